//! Commands behind the "add to calendar" action and the calendar view

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use crate::api::{ApiError, ScheduledWorkout, WorkoutRequest};
use crate::events::PlannerEvent;
use crate::models::plan::GeneratedPlan;
use crate::scheduling::{map_schedule, ScheduleSummary};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
  #[error("No workout plan to schedule")]
  NoPlan,

  #[error("Please log in to schedule workouts")]
  NotAuthenticated,
}

impl Serialize for ScheduleError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Put every entry of a weekly plan on the calendar.
///
/// Entries are submitted one at a time in schedule order. A failed entry is
/// recorded and the rest still go out. On at least one success a
/// `WorkoutsScheduled` event is published for other views.
pub async fn schedule_plan(
  state: &AppState,
  plan: &GeneratedPlan,
  cycle_phase: Option<&str>,
  today: NaiveDate,
) -> Result<ScheduleSummary, ScheduleError> {
  let entries = match plan.schedule() {
    Some(entries) if !entries.is_empty() => entries,
    _ => return Err(ScheduleError::NoPlan),
  };

  let (_, user_id) = state
    .session
    .credentials()
    .ok_or(ScheduleError::NotAuthenticated)?;

  let mapping = map_schedule(entries, today);
  let mut summary = ScheduleSummary {
    skipped: mapping.skipped,
    ..Default::default()
  };

  for entry in &mapping.resolved {
    let request = WorkoutRequest::for_entry(
      entry,
      user_id,
      plan.name(),
      &state.config.default_workout_time,
      cycle_phase,
    );

    match state.api.create_workout(&request).await {
      Ok(response) if response.success => {
        info!(date = %request.date, title = %request.title, "Workout scheduled");
        summary.scheduled.push(request);
      }
      Ok(response) => {
        let message = response
          .error
          .unwrap_or_else(|| format!("Failed to schedule {}", request.workout_type));
        error!(date = %request.date, error = %message, "API rejected workout");
        summary.failures.push(message);
      }
      Err(e) => {
        error!(date = %request.date, error = %e, "Error scheduling {}", request.workout_type);
        summary
          .failures
          .push(format!("Failed to schedule {}", request.workout_type));
      }
    }
  }

  if summary.is_success() {
    state.events.publish(PlannerEvent::WorkoutsScheduled {
      count: summary.scheduled.len(),
    });
  }

  info!(
    scheduled = summary.scheduled.len(),
    failed = summary.failures.len(),
    skipped = summary.skipped.len(),
    "{}",
    summary.message()
  );

  Ok(summary)
}

/// Re-fetch the signed-in user's calendar, typically after a
/// `WorkoutsScheduled` event
pub async fn refresh_scheduled_workouts(
  state: &AppState,
) -> Result<Vec<ScheduledWorkout>, ApiError> {
  let (_, user_id) = state
    .session
    .credentials()
    .ok_or(ApiError::NotAuthenticated)?;

  state.api.list_workouts(user_id).await
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Session;
  use crate::fallback::select_fallback_plan;
  use crate::models::preferences::PreferenceInput;
  use crate::scheduling::ScheduleOutcome;
  use crate::test_utils::*;
  use mockito::Matcher;

  fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
  }

  #[tokio::test]
  async fn test_schedules_every_entry_in_order() {
    let mut server = mockito::Server::new_async().await;
    let dates = ["2024-01-15", "2024-01-17", "2024-01-12"];
    let mut mocks = Vec::new();
    for date in dates {
      mocks.push(
        server
          .mock("POST", "/api/workouts")
          .match_body(Matcher::PartialJsonString(format!(r#"{{"date": "{}"}}"#, date)))
          .with_status(200)
          .with_header("content-type", "application/json")
          .with_body(r#"{"success": true, "workout_id": 1}"#)
          .expect(1)
          .create_async()
          .await,
      );
    }

    let state = mock_state(&server.url(), mock_session());
    let mut events = state.events.subscribe();
    let plan: GeneratedPlan = select_fallback_plan(&PreferenceInput::default(), None).into();

    let summary = schedule_plan(&state, &plan, None, wednesday()).await.unwrap();

    let scheduled: Vec<&str> = summary.scheduled.iter().map(|w| w.date.as_str()).collect();
    assert_eq!(scheduled, dates);
    assert_eq!(summary.outcome(), ScheduleOutcome::Scheduled { count: 3 });
    assert_eq!(
      summary.scheduled[0].title,
      "Strength Training - Personalized Workout Program"
    );
    assert_eq!(
      events.try_recv().unwrap(),
      PlannerEvent::WorkoutsScheduled { count: 3 }
    );
    for mock in mocks {
      mock.assert_async().await;
    }
  }

  #[tokio::test]
  async fn test_all_rejected_reports_first_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/api/workouts")
      .with_status(500)
      .with_header("content-type", "application/json")
      .with_body(r#"{"success": false, "error": "database is locked"}"#)
      .expect(3)
      .create_async()
      .await;

    let state = mock_state(&server.url(), mock_session());
    let mut events = state.events.subscribe();
    let plan: GeneratedPlan = select_fallback_plan(&PreferenceInput::default(), None).into();

    let summary = schedule_plan(&state, &plan, None, wednesday()).await.unwrap();

    assert_eq!(
      summary.outcome(),
      ScheduleOutcome::Failed {
        first_error: "database is locked".into()
      }
    );
    assert_eq!(summary.failures.len(), 3);
    assert!(events.try_recv().is_err());
  }

  #[tokio::test]
  async fn test_partial_success_still_publishes() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/api/workouts")
      .match_body(Matcher::Regex(r#""workout_type":"Cardio""#.into()))
      .with_status(400)
      .with_header("content-type", "application/json")
      .with_body(r#"{"success": false}"#)
      .create_async()
      .await;
    server
      .mock("POST", "/api/workouts")
      .match_body(Matcher::Regex(
        r#""workout_type":"(Strength Training|Flexibility & Recovery)""#.into(),
      ))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"success": true}"#)
      .create_async()
      .await;

    let state = mock_state(&server.url(), mock_session());
    let mut events = state.events.subscribe();
    let plan: GeneratedPlan = select_fallback_plan(&PreferenceInput::default(), None).into();

    let summary = schedule_plan(&state, &plan, None, wednesday()).await.unwrap();

    assert_eq!(summary.scheduled.len(), 2);
    assert_eq!(summary.failures, vec!["Failed to schedule Cardio"]);
    assert_eq!(summary.message(), "Successfully scheduled 2 workouts to your calendar!");
    assert!(events.try_recv().is_ok());
  }

  #[tokio::test]
  async fn test_unresolvable_days_are_skipped() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/api/workouts")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"success": true}"#)
      .expect(1)
      .create_async()
      .await;

    let state = mock_state(&server.url(), mock_session());
    let plan = GeneratedPlan::Scheduled(mock_plan(&[("Funday", "Mystery"), ("Thu", "Cardio")]));

    let summary = schedule_plan(&state, &plan, Some("luteal"), wednesday())
      .await
      .unwrap();

    assert_eq!(summary.skipped, vec!["Funday"]);
    assert_eq!(summary.scheduled.len(), 1);
    assert_eq!(summary.scheduled[0].date, "2024-01-11");
    assert_eq!(summary.scheduled[0].notes, "Adaptive workout plan - luteal phase");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_nothing_resolvable_is_nothing_scheduled() {
    let state = mock_state("http://127.0.0.1:9", mock_session());
    let mut events = state.events.subscribe();
    let plan = GeneratedPlan::Scheduled(mock_plan(&[("Funday", "Mystery")]));

    let summary = schedule_plan(&state, &plan, None, wednesday()).await.unwrap();
    assert_eq!(summary.outcome(), ScheduleOutcome::NothingScheduled);
    assert!(events.try_recv().is_err());
  }

  #[tokio::test]
  async fn test_transport_error_recorded_per_entry() {
    let state = mock_state("http://127.0.0.1:9", mock_session());
    let plan = GeneratedPlan::Scheduled(mock_plan(&[("Monday", "Strength")]));

    let summary = schedule_plan(&state, &plan, None, wednesday()).await.unwrap();
    assert_eq!(summary.failures, vec!["Failed to schedule Strength"]);
    assert_eq!(summary.message(), "Failed to schedule workouts: Failed to schedule Strength");
  }

  #[tokio::test]
  async fn test_requires_schedule_and_login() {
    let sectioned: GeneratedPlan = serde_json::from_str(r#"{"sections": {}}"#).unwrap();
    let state = mock_state("http://127.0.0.1:9", mock_session());
    assert!(matches!(
      schedule_plan(&state, &sectioned, None, wednesday()).await,
      Err(ScheduleError::NoPlan)
    ));

    let signed_out = mock_state("http://127.0.0.1:9", Session::default());
    let plan: GeneratedPlan = select_fallback_plan(&PreferenceInput::default(), None).into();
    assert!(matches!(
      schedule_plan(&signed_out, &plan, None, wednesday()).await,
      Err(ScheduleError::NotAuthenticated)
    ));
  }

  #[tokio::test]
  async fn test_refresh_scheduled_workouts() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/api/workouts")
      .match_query(Matcher::UrlEncoded("user_id".into(), "7".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"success": true, "workouts": []}"#)
      .create_async()
      .await;

    let state = mock_state(&server.url(), mock_session());
    assert!(refresh_scheduled_workouts(&state).await.unwrap().is_empty());

    let signed_out = mock_state(&server.url(), Session::default());
    assert!(matches!(
      refresh_scheduled_workouts(&signed_out).await,
      Err(ApiError::NotAuthenticated)
    ));
  }
}
