use crate::api::{ApiError, PlannerApi};
use crate::config::{ConfigError, PlannerConfig, Session};
use crate::events::EventBus;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Api(#[from] ApiError),
}

/// Everything a command handler needs: configuration, the signed-in
/// session, the HTTP client and the notification bus
pub struct AppState {
  pub config: PlannerConfig,
  pub session: Session,
  pub api: PlannerApi,
  pub events: EventBus,
}

impl AppState {
  pub fn new(config: PlannerConfig, session: Session) -> Result<Self, ApiError> {
    let api = PlannerApi::new(&config, session.token.clone())?;
    Ok(Self {
      config,
      session,
      api,
      events: EventBus::new(),
    })
  }
}

/// Build state from the environment (after `.env` has been loaded)
pub fn initialize_state() -> Result<AppState, StartupError> {
  let config = PlannerConfig::from_env()?;
  let session = Session::from_env()?;

  tracing::info!(
    api_base = %config.api_base,
    signed_in = session.credentials().is_some(),
    "Planner state initialized"
  );

  Ok(AppState::new(config, session)?)
}
