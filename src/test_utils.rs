//! Test utilities and helpers
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - State wired to a mock HTTP server

use crate::api::{PlannerApi, WorkoutRequest};
use crate::config::{PlannerConfig, Session};
use crate::models::plan::{DaySchedule, ExerciseEntry, PlanTemplate};
use crate::models::preferences::{FitnessLevel, PreferenceInput};
use crate::state::AppState;
use std::time::Duration;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Intermediate, no equipment, no focus areas, no cycle phase
pub fn mock_preferences(days: &[&str]) -> PreferenceInput {
  PreferenceInput {
    fitness_level: Some(FitnessLevel::Intermediate),
    workout_days: days.iter().map(|d| d.to_string()).collect(),
    session_duration: "30-45".to_string(),
    use_equipment: false,
    focus_areas: vec![],
    cycle_phase: None,
  }
}

pub fn mock_day_schedule(day: &str, workout_type: &str) -> DaySchedule {
  DaySchedule {
    day: day.to_string(),
    workout_type: workout_type.to_string(),
    duration: 30,
    exercises: vec![ExerciseEntry::new("Burpees", 3, "10", "30s")],
    calories: 150,
  }
}

/// Plan with one entry per (day, type) pair
pub fn mock_plan(days: &[(&str, &str)]) -> PlanTemplate {
  PlanTemplate {
    name: "Test Plan".to_string(),
    duration: "Weekly".to_string(),
    difficulty: "Intermediate".to_string(),
    total_workouts: days.len() as u32,
    estimated_calories: 500,
    schedule: days
      .iter()
      .map(|(day, workout_type)| mock_day_schedule(day, workout_type))
      .collect(),
  }
}

pub fn mock_workout_request(date: &str) -> WorkoutRequest {
  WorkoutRequest {
    user_id: 7,
    title: "Cardio - Test Plan".to_string(),
    date: date.to_string(),
    time: "09:00".to_string(),
    duration: 30,
    workout_type: "Cardio".to_string(),
    notes: "Adaptive workout plan".to_string(),
  }
}

/// Signed in as user 7 with token "test-token", gender unknown
pub fn mock_session() -> Session {
  Session {
    user_id: Some(7),
    token: Some("test-token".to_string()),
    gender: None,
  }
}

/// ---------------------------------------------------------------------------
/// Mock Server Wiring
/// ---------------------------------------------------------------------------

/// Config pointing every endpoint at `base_url` with a short timeout
pub fn mock_config(base_url: &str) -> PlannerConfig {
  let mut config = PlannerConfig::with_base(base_url);
  config.request_timeout = Duration::from_secs(2);
  config
}

pub fn mock_api(base_url: &str, token: Option<&str>) -> PlannerApi {
  PlannerApi::new(&mock_config(base_url), token.map(String::from))
    .expect("Failed to build test client")
}

pub fn mock_state(base_url: &str, session: Session) -> AppState {
  AppState::new(mock_config(base_url), session).expect("Failed to build test state")
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_factories_create_valid_data() {
    let prefs = mock_preferences(&["monday"]);
    assert_eq!(prefs.workout_days, vec!["monday"]);

    let plan = mock_plan(&[("Monday", "Cardio"), ("Friday", "Yoga")]);
    assert_eq!(plan.total_workouts, 2);
    assert_eq!(plan.schedule[1].day, "Friday");

    assert_eq!(mock_session().credentials(), Some(("test-token", 7)));
  }

  #[test]
  fn test_mock_config_targets_base_url() {
    let config = mock_config("http://127.0.0.1:1234/");
    assert_eq!(config.api_base, "http://127.0.0.1:1234");
    assert_eq!(config.generation_url, "http://127.0.0.1:1234/api/adaptive-workout");
  }
}
