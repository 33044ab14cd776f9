//! Calendar scheduling for weekday-named plans
//!
//! Each schedule entry names a weekday ("Monday", "monday" or "Mon"). It is
//! placed on the next occurrence of that weekday strictly after today; an
//! entry naming today's weekday lands a week out. Entries whose day cannot
//! be resolved are skipped, never fatal.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::api::WorkoutRequest;
use crate::models::plan::DaySchedule;
use crate::models::weekday::{calendar_index, calendar_index_of, resolve_day};

/// Minutes used when an entry carries no duration
const DEFAULT_DURATION_MINUTES: u32 = 30;

/// ---------------------------------------------------------------------------
/// Date arithmetic
/// ---------------------------------------------------------------------------

/// Today in local time; scheduling works on whole days
pub fn local_today() -> NaiveDate {
  chrono::Local::now().date_naive()
}

/// Next date after `today` falling on the weekday at `table_index`.
/// Always 1..=7 days out; `None` past the end of the calendar.
pub fn next_occurrence(today: NaiveDate, table_index: usize) -> Option<NaiveDate> {
  let target = calendar_index(table_index) as i64;
  let current = calendar_index_of(today) as i64;

  let mut delta = target - current;
  if delta <= 0 {
    delta += 7;
  }

  today.checked_add_days(Days::new(delta as u64))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry {
  pub date: NaiveDate,
  pub workout_type: String,
  pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleMapping {
  /// In schedule order
  pub resolved: Vec<ResolvedEntry>,
  /// Day names that matched no weekday
  pub skipped: Vec<String>,
}

/// Resolve every entry to a concrete date relative to `today`
pub fn map_schedule(entries: &[DaySchedule], today: NaiveDate) -> ScheduleMapping {
  let mut mapping = ScheduleMapping::default();

  for entry in entries {
    let Some(idx) = resolve_day(&entry.day) else {
      warn!(day = %entry.day, "Could not find day, skipping schedule entry");
      mapping.skipped.push(entry.day.clone());
      continue;
    };

    match next_occurrence(today, idx) {
      Some(date) => mapping.resolved.push(ResolvedEntry {
        date,
        workout_type: entry.workout_type.clone(),
        duration: entry.duration,
      }),
      None => {
        warn!(day = %entry.day, %today, "Date out of range, skipping schedule entry");
        mapping.skipped.push(entry.day.clone());
      }
    }
  }

  mapping
}

impl WorkoutRequest {
  /// Persistence payload for one resolved entry
  pub fn for_entry(
    entry: &ResolvedEntry,
    user_id: i64,
    plan_name: &str,
    time: &str,
    cycle_phase: Option<&str>,
  ) -> Self {
    let notes = match cycle_phase.filter(|p| !p.is_empty()) {
      Some(phase) => format!("Adaptive workout plan - {} phase", phase),
      None => "Adaptive workout plan".to_string(),
    };

    Self {
      user_id,
      title: format!("{} - {}", entry.workout_type, plan_name),
      date: entry.date.format("%Y-%m-%d").to_string(),
      time: time.to_string(),
      duration: if entry.duration == 0 {
        DEFAULT_DURATION_MINUTES
      } else {
        entry.duration
      },
      workout_type: entry.workout_type.clone(),
      notes,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Batch outcome
/// ---------------------------------------------------------------------------

/// Per-entry results of one scheduling run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleSummary {
  pub scheduled: Vec<WorkoutRequest>,
  /// Error messages in submission order
  pub failures: Vec<String>,
  pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleOutcome {
  Scheduled { count: usize },
  Failed { first_error: String },
  NothingScheduled,
}

impl ScheduleSummary {
  /// One success is enough for the run to count as scheduled
  pub fn outcome(&self) -> ScheduleOutcome {
    if !self.scheduled.is_empty() {
      ScheduleOutcome::Scheduled {
        count: self.scheduled.len(),
      }
    } else if let Some(first) = self.failures.first() {
      ScheduleOutcome::Failed {
        first_error: first.clone(),
      }
    } else {
      ScheduleOutcome::NothingScheduled
    }
  }

  pub fn is_success(&self) -> bool {
    !self.scheduled.is_empty()
  }

  /// Notification text for the user
  pub fn message(&self) -> String {
    match self.outcome() {
      ScheduleOutcome::Scheduled { count } => format!(
        "Successfully scheduled {} workout{} to your calendar!",
        count,
        if count > 1 { "s" } else { "" }
      ),
      ScheduleOutcome::Failed { first_error } => {
        format!("Failed to schedule workouts: {}", first_error)
      }
      ScheduleOutcome::NothingScheduled => {
        "No workouts could be scheduled. Please check your plan.".to_string()
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
