//! Fixed weekday table shared by plan relabelling and calendar scheduling.
//!
//! Table order is Monday-first; the calendar index used for date arithmetic
//! is Sunday-first (Sunday = 0 ... Saturday = 6).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayEntry {
  pub id: &'static str,
  pub label: &'static str,
  pub short: &'static str,
}

pub const WEEKDAYS: [WeekdayEntry; 7] = [
  WeekdayEntry { id: "monday", label: "Monday", short: "Mon" },
  WeekdayEntry { id: "tuesday", label: "Tuesday", short: "Tue" },
  WeekdayEntry { id: "wednesday", label: "Wednesday", short: "Wed" },
  WeekdayEntry { id: "thursday", label: "Thursday", short: "Thu" },
  WeekdayEntry { id: "friday", label: "Friday", short: "Fri" },
  WeekdayEntry { id: "saturday", label: "Saturday", short: "Sat" },
  WeekdayEntry { id: "sunday", label: "Sunday", short: "Sun" },
];

/// Display label for a canonical id ("monday" -> "Monday")
pub fn label_for_id(id: &str) -> Option<&'static str> {
  WEEKDAYS.iter().find(|d| d.id == id).map(|d| d.label)
}

/// Resolve a free-form day name to its table index.
///
/// Tried in order: exact label, case-insensitive id, then the first three
/// characters against the short form. "Wednesday", "wednesday" and "Wed"
/// all resolve to 2.
pub fn resolve_day(name: &str) -> Option<usize> {
  if let Some(idx) = WEEKDAYS.iter().position(|d| d.label == name) {
    return Some(idx);
  }

  let lowered = name.to_lowercase();
  if let Some(idx) = WEEKDAYS.iter().position(|d| d.id == lowered) {
    return Some(idx);
  }

  let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
  WEEKDAYS
    .iter()
    .position(|d| d.short.to_lowercase() == prefix)
}

/// Sunday-first calendar index for a table index
pub fn calendar_index(table_index: usize) -> u32 {
  if table_index == 6 {
    0
  } else {
    table_index as u32 + 1
  }
}

/// Sunday-first calendar index of a date
pub fn calendar_index_of(date: NaiveDate) -> u32 {
  date.weekday().num_days_from_sunday()
}
