use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl FitnessLevel {
  /// Case-insensitive parse; anything else (including "") is unset
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "beginner" => Some(Self::Beginner),
      "intermediate" => Some(Self::Intermediate),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }

  /// Label shown as a plan's difficulty
  pub fn label(&self) -> &'static str {
    match self {
      Self::Beginner => "Beginner",
      Self::Intermediate => "Intermediate",
      Self::Advanced => "Advanced",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Menstrual cycle phases
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
  Menstrual,
  Follicular,
  Ovulation,
  Luteal,
}

impl CyclePhase {
  pub const ALL: [CyclePhase; 4] = [
    CyclePhase::Menstrual,
    CyclePhase::Follicular,
    CyclePhase::Ovulation,
    CyclePhase::Luteal,
  ];

  /// Exact match on the wire value ("menstrual", ...)
  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|p| p.as_str() == s)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Menstrual => "menstrual",
      Self::Follicular => "follicular",
      Self::Ovulation => "ovulation",
      Self::Luteal => "luteal",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Menstrual => "Menstrual (Days 1-5)",
      Self::Follicular => "Follicular (Days 6-14)",
      Self::Ovulation => "Ovulation (Days 15-17)",
      Self::Luteal => "Luteal (Days 18-28)",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::Menstrual => "Light exercises, focus on rest and recovery",
      Self::Follicular => "Normal intensity, strength training focus",
      Self::Ovulation => "Peak performance, high-intensity workouts",
      Self::Luteal => "Moderate intensity, focus on endurance",
    }
  }

  /// Recommended training intensity for the phase
  pub fn intensity(&self) -> &'static str {
    match self {
      Self::Menstrual => "Low",
      Self::Follicular => "Moderate-High",
      Self::Ovulation => "High",
      Self::Luteal => "Moderate",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Focus areas
/// ---------------------------------------------------------------------------

/// Body-area picker entries: (id, display name)
pub const BODY_AREAS: [(&str, &str); 6] = [
  ("upper-body", "Upper Body"),
  ("core", "Core Strength"),
  ("lower-body", "Lower Body"),
  ("cardio", "Cardio"),
  ("flexibility", "Flexibility"),
  ("balance", "Balance"),
];

/// Exercise-type label sent to the generation endpoint for a focus area.
/// Unknown ids pass through unchanged.
pub fn focus_area_exercise_type(id: &str) -> String {
  match id {
    "upper-body" => "Strength Training",
    "lower-body" => "Leg Exercises",
    "core" => "Core Training",
    "cardio" => "Cardiovascular",
    "flexibility" => "Flexibility",
    "balance" => "Balance",
    other => other,
  }
  .to_string()
}

pub fn is_female(gender: Option<&str>) -> bool {
  gender.is_some_and(|g| g.trim().eq_ignore_ascii_case("female"))
}

/// ---------------------------------------------------------------------------
/// Preference input
/// ---------------------------------------------------------------------------

/// What the user picked on the configure screen. Every field is optional;
/// `{}` is a valid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceInput {
  #[serde(deserialize_with = "lenient_fitness_level")]
  pub fitness_level: Option<FitnessLevel>,
  /// Canonical weekday ids in selection order
  pub workout_days: Vec<String>,
  /// Bucket label, only forwarded to the generation endpoint
  pub session_duration: String,
  pub use_equipment: bool,
  pub focus_areas: Vec<String>,
  #[serde(alias = "menstrualCyclePhase")]
  pub cycle_phase: Option<String>,
}

impl PreferenceInput {
  /// Cycle phase as entered, with "" treated as unset
  pub fn cycle_phase(&self) -> Option<&str> {
    self.cycle_phase.as_deref().filter(|p| !p.is_empty())
  }

  pub fn focus_labels(&self) -> Vec<String> {
    self
      .focus_areas
      .iter()
      .map(|area| focus_area_exercise_type(area))
      .collect()
  }
}

fn lenient_fitness_level<'de, D>(deserializer: D) -> Result<Option<FitnessLevel>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw: Option<String> = Option::deserialize(deserializer)?;
  Ok(raw.as_deref().and_then(FitnessLevel::parse))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_object_is_valid_input() {
    let prefs: PreferenceInput = serde_json::from_str("{}").unwrap();
    assert!(prefs.fitness_level.is_none());
    assert!(prefs.workout_days.is_empty());
    assert!(prefs.cycle_phase().is_none());
    assert!(!prefs.use_equipment);
  }

  #[test]
  fn test_blank_fields_degrade_to_unset() {
    let prefs: PreferenceInput =
      serde_json::from_str(r#"{"fitnessLevel": "", "cyclePhase": "", "workoutDays": []}"#).unwrap();
    assert!(prefs.fitness_level.is_none());
    assert!(prefs.cycle_phase().is_none());
  }

  #[test]
  fn test_full_input_parses() {
    let prefs: PreferenceInput = serde_json::from_str(
      r#"{
        "fitnessLevel": "Advanced",
        "workoutDays": ["tuesday", "thursday"],
        "sessionDuration": "30-45",
        "useEquipment": true,
        "focusAreas": ["core", "cardio"],
        "menstrualCyclePhase": "luteal"
      }"#,
    )
    .unwrap();
    assert_eq!(prefs.fitness_level, Some(FitnessLevel::Advanced));
    assert_eq!(prefs.workout_days, vec!["tuesday", "thursday"]);
    assert_eq!(prefs.cycle_phase(), Some("luteal"));
    assert_eq!(prefs.focus_labels(), vec!["Core Training", "Cardiovascular"]);
  }

  #[test]
  fn test_unknown_fitness_level_is_unset() {
    let prefs: PreferenceInput = serde_json::from_str(r#"{"fitnessLevel": "elite"}"#).unwrap();
    assert!(prefs.fitness_level.is_none());
  }

  #[test]
  fn test_focus_area_mapping_passes_unknown_through() {
    assert_eq!(focus_area_exercise_type("upper-body"), "Strength Training");
    assert_eq!(focus_area_exercise_type("lower-body"), "Leg Exercises");
    assert_eq!(focus_area_exercise_type("mobility"), "mobility");
  }

  #[test]
  fn test_cycle_phase_parse_is_exact() {
    assert_eq!(CyclePhase::parse("ovulation"), Some(CyclePhase::Ovulation));
    assert_eq!(CyclePhase::parse("Ovulation"), None);
    assert_eq!(CyclePhase::parse("pms"), None);
    assert_eq!(CyclePhase::Menstrual.intensity(), "Low");
    assert_eq!(CyclePhase::Follicular.intensity(), "Moderate-High");
  }

  #[test]
  fn test_is_female() {
    assert!(is_female(Some("female")));
    assert!(is_female(Some("Female")));
    assert!(!is_female(Some("male")));
    assert!(!is_female(None));
  }
}
