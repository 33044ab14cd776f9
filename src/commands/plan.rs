//! Commands behind the configure screen: who the user is, and which plan
//! to show them

use serde::Serialize;
use tracing::{info, warn};

use crate::api::GenerationRequest;
use crate::fallback::select_fallback_plan;
use crate::models::plan::{GeneratedPlan, PlanOverview};
use crate::models::preferences::{
  focus_area_exercise_type, CyclePhase, PreferenceInput, BODY_AREAS,
};
use crate::models::weekday::{WeekdayEntry, WEEKDAYS};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
  Remote,
  Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
  pub plan: GeneratedPlan,
  pub source: PlanSource,
  pub overview: PlanOverview,
}

impl PlanResult {
  pub fn new(plan: GeneratedPlan, source: PlanSource) -> Self {
    let overview = plan.overview();
    Self {
      plan,
      source,
      overview,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct FocusAreaOption {
  pub id: &'static str,
  pub name: &'static str,
  /// Label sent to the generator when this area is picked
  pub exercise_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CyclePhaseOption {
  pub id: &'static str,
  pub label: &'static str,
  pub description: &'static str,
  pub intensity: &'static str,
}

/// Choices offered on the configure screen
#[derive(Debug, Clone, Serialize)]
pub struct PlannerOptions {
  pub weekdays: Vec<WeekdayEntry>,
  pub focus_areas: Vec<FocusAreaOption>,
  pub cycle_phases: Vec<CyclePhaseOption>,
}

pub fn planner_options() -> PlannerOptions {
  PlannerOptions {
    weekdays: WEEKDAYS.to_vec(),
    focus_areas: BODY_AREAS
      .iter()
      .map(|&(id, name)| FocusAreaOption {
        id,
        name,
        exercise_type: focus_area_exercise_type(id),
      })
      .collect(),
    cycle_phases: CyclePhase::ALL
      .iter()
      .map(|phase| CyclePhaseOption {
        id: phase.as_str(),
        label: phase.label(),
        description: phase.description(),
        intensity: phase.intensity(),
      })
      .collect(),
  }
}

/// Lower-cased gender of the signed-in user, if it can be found.
///
/// Uses the session value when present, otherwise asks the profile
/// endpoint. Failures leave the gender unknown.
pub async fn resolve_gender(state: &AppState) -> Option<String> {
  if let Some(gender) = &state.session.gender {
    return Some(gender.to_lowercase());
  }

  state.session.credentials()?;

  match state.api.fetch_profile().await {
    Ok(profile) => profile.gender.map(|g| g.to_lowercase()),
    Err(e) => {
      warn!(error = %e, "Error fetching user gender");
      None
    }
  }
}

/// Generate a plan remotely, falling back to the local selector on any
/// failure. Never fails.
pub async fn generate_plan(
  state: &AppState,
  prefs: &PreferenceInput,
  gender: Option<&str>,
) -> PlanResult {
  let request = GenerationRequest::from_preferences(prefs, gender);
  info!(
    days = request.workout_days.len(),
    fitness_level = %request.fitness_level,
    "Generating adaptive workout plan"
  );

  match state.api.generate_plan(&request).await {
    Ok(plan) => PlanResult::new(plan, PlanSource::Remote),
    Err(e) => {
      warn!(error = %e, "Plan generation failed, using fallback plan");
      PlanResult::new(select_fallback_plan(prefs, gender).into(), PlanSource::Fallback)
    }
  }
}
