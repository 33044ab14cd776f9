use serde::Serialize;
use std::env;
use std::time::Duration;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_API_BASE: &str = "http://localhost:5001";
const GENERATION_PATH: &str = "/api/adaptive-workout";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WORKOUT_TIME: &str = "09:00";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {reason}")]
  Invalid { name: String, reason: String },
}

impl Serialize for ConfigError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Planner Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlannerConfig {
  /// Base URL of the profile / workouts API, no trailing slash
  pub api_base: String,
  pub generation_url: String,
  pub request_timeout: Duration,
  /// "HH:MM" attached to every scheduled workout
  pub default_workout_time: String,
}

impl Default for PlannerConfig {
  fn default() -> Self {
    Self::with_base(DEFAULT_API_BASE)
  }
}

impl PlannerConfig {
  pub fn with_base(api_base: &str) -> Self {
    let api_base = api_base.trim_end_matches('/').to_string();
    Self {
      generation_url: format!("{}{}", api_base, GENERATION_PATH),
      api_base,
      request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      default_workout_time: DEFAULT_WORKOUT_TIME.to_string(),
    }
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let api_base = env::var("PLANNER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    url::Url::parse(&api_base).map_err(|e| invalid("PLANNER_API_BASE", e))?;

    let mut config = Self::with_base(&api_base);

    if let Ok(generation_url) = env::var("PLANNER_GENERATION_URL") {
      url::Url::parse(&generation_url).map_err(|e| invalid("PLANNER_GENERATION_URL", e))?;
      config.generation_url = generation_url;
    }

    if let Ok(raw) = env::var("PLANNER_REQUEST_TIMEOUT_SECS") {
      let secs: u64 = raw
        .parse()
        .map_err(|e| invalid("PLANNER_REQUEST_TIMEOUT_SECS", e))?;
      if secs == 0 {
        return Err(invalid("PLANNER_REQUEST_TIMEOUT_SECS", "must be positive"));
      }
      config.request_timeout = Duration::from_secs(secs);
    }

    if let Ok(time) = env::var("PLANNER_DEFAULT_TIME") {
      chrono::NaiveTime::parse_from_str(&time, "%H:%M")
        .map_err(|e| invalid("PLANNER_DEFAULT_TIME", e))?;
      config.default_workout_time = time;
    }

    Ok(config)
  }
}

fn invalid(name: &str, reason: impl std::fmt::Display) -> ConfigError {
  ConfigError::Invalid {
    name: name.to_string(),
    reason: reason.to_string(),
  }
}

/// ---------------------------------------------------------------------------
/// Session
/// ---------------------------------------------------------------------------

/// Who is signed in. Any part may be missing.
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub user_id: Option<i64>,
  pub token: Option<String>,
  /// Gender already known from the auth payload, if any
  pub gender: Option<String>,
}

impl Session {
  pub fn from_env() -> Result<Self, ConfigError> {
    let user_id = match env::var("PLANNER_USER_ID") {
      Ok(raw) => Some(raw.parse().map_err(|e| invalid("PLANNER_USER_ID", e))?),
      Err(_) => None,
    };

    Ok(Self {
      user_id,
      token: env::var("PLANNER_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
      gender: env::var("PLANNER_GENDER").ok().filter(|g| !g.is_empty()),
    })
  }

  /// Token and user id, when both are present
  pub fn credentials(&self) -> Option<(&str, i64)> {
    Some((self.token.as_deref()?, self.user_id?))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
