use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Minutes counted for a sectioned exercise with no usable duration
const DEFAULT_SECTION_MINUTES: u32 = 2;

/// ---------------------------------------------------------------------------
/// Weekly plan (schedule format)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTemplate {
  #[serde(default)]
  pub name: String,
  #[serde(default = "weekly")]
  pub duration: String,
  #[serde(default)]
  pub difficulty: String,
  #[serde(default, deserialize_with = "lenient_count")]
  pub total_workouts: u32,
  #[serde(default, deserialize_with = "lenient_count")]
  pub estimated_calories: u32,
  pub schedule: Vec<DaySchedule>,
}

fn weekly() -> String {
  "Weekly".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
  #[serde(default, deserialize_with = "lenient_text")]
  pub day: String,
  #[serde(rename = "type", default, deserialize_with = "lenient_text")]
  pub workout_type: String,
  /// Minutes
  #[serde(default, deserialize_with = "lenient_count")]
  pub duration: u32,
  #[serde(default)]
  pub exercises: Vec<ExerciseEntry>,
  #[serde(default, deserialize_with = "lenient_count")]
  pub calories: u32,
}

impl DaySchedule {
  pub fn category(&self) -> DayCategory {
    DayCategory::classify(&self.workout_type)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
  #[serde(default)]
  pub name: String,
  #[serde(default, deserialize_with = "lenient_count")]
  pub sets: u32,
  /// Free-form: "10-12", "15 min", "hold 30s each"
  #[serde(default, deserialize_with = "lenient_text")]
  pub reps: String,
  #[serde(default, deserialize_with = "lenient_text")]
  pub rest: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
}

impl ExerciseEntry {
  pub fn new(name: &str, sets: u32, reps: &str, rest: &str) -> Self {
    Self {
      name: name.to_string(),
      sets,
      reps: reps.to_string(),
      rest: rest.to_string(),
      note: None,
    }
  }

  pub fn with_note(mut self, note: &str) -> Self {
    self.note = Some(note.to_string());
    self
  }
}

/// Whole non-negative number from an integer, a float (rounded) or a
/// numeric string. Anything else counts as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Value::deserialize(deserializer)?;
  let number = match &raw {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };

  Ok(match number {
    Some(n) if n.is_finite() && n >= 0.0 => n.round() as u32,
    _ => 0,
  })
}

/// Free-form text that the generator sometimes sends as a number
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  })
}

/// Broad category of a day's workout type, used to badge schedule cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
  Strength,
  Cardio,
  Rest,
  Recovery,
  Adaptive,
  Other,
  Unspecified,
}

impl DayCategory {
  /// Substring match, first hit wins: "Strength & Cardio" is Strength
  pub fn classify(workout_type: &str) -> Self {
    if workout_type.is_empty() {
      return Self::Unspecified;
    }
    [
      ("Strength", Self::Strength),
      ("Cardio", Self::Cardio),
      ("Rest", Self::Rest),
      ("Recovery", Self::Recovery),
      ("Adaptive", Self::Adaptive),
    ]
    .into_iter()
    .find(|(needle, _)| workout_type.contains(needle))
    .map(|(_, category)| category)
    .unwrap_or(Self::Other)
  }
}

/// ---------------------------------------------------------------------------
/// Sectioned plan (warm-up / main / cool-down format)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionedPlan {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub sections: PlanSections,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub focus_areas: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub equipment: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub safety_notes: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub progression_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub additional_resources: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanSections {
  pub warm_up: Vec<SectionExercise>,
  pub main_exercises: Vec<SectionExercise>,
  pub cool_down: Vec<SectionExercise>,
}

/// Exercise in a sectioned plan. The generator is loose about types, so the
/// numeric-looking fields are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionExercise {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sets: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reps: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rest: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub adaptations: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternatives: Option<String>,
}

impl SectionExercise {
  /// Leading integer of `duration` ("5 minutes" -> 5); missing, unparsable
  /// or zero counts as two minutes
  pub fn minutes(&self) -> u32 {
    let parsed = match &self.duration {
      Some(Value::Number(n)) => n
        .as_u64()
        .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .map(|m| m as u32),
      Some(Value::String(s)) => {
        let digits: String = s
          .trim_start()
          .chars()
          .take_while(|c| c.is_ascii_digit())
          .collect();
        digits.parse::<u32>().ok()
      }
      _ => None,
    };

    match parsed {
      Some(m) if m > 0 => m,
      _ => DEFAULT_SECTION_MINUTES,
    }
  }
}

impl SectionedPlan {
  pub fn section_minutes(section: &[SectionExercise]) -> u32 {
    section.iter().map(SectionExercise::minutes).sum()
  }

  pub fn warm_up_minutes(&self) -> u32 {
    Self::section_minutes(&self.sections.warm_up)
  }

  pub fn cool_down_minutes(&self) -> u32 {
    Self::section_minutes(&self.sections.cool_down)
  }
}

/// ---------------------------------------------------------------------------
/// Generated plan: either shape the generator may return
/// ---------------------------------------------------------------------------

/// A `schedule` array selects the weekly format; otherwise a `sections`
/// object is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedPlan {
  Scheduled(PlanTemplate),
  Sectioned(SectionedPlan),
}

impl GeneratedPlan {
  pub fn name(&self) -> &str {
    match self {
      Self::Scheduled(plan) => &plan.name,
      Self::Sectioned(plan) => plan.name.as_deref().unwrap_or_default(),
    }
  }

  /// Schedule entries, if this plan can be put on a calendar
  pub fn schedule(&self) -> Option<&[DaySchedule]> {
    match self {
      Self::Scheduled(plan) => Some(&plan.schedule),
      Self::Sectioned(_) => None,
    }
  }
}

/// What to show next to a plan: a badge per day, or section totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum PlanOverview {
  Weekly {
    days: Vec<DayOverview>,
  },
  Sectioned {
    warm_up_minutes: u32,
    main_exercises: usize,
    cool_down_minutes: u32,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOverview {
  pub day: String,
  pub workout_type: String,
  pub category: DayCategory,
  pub duration: u32,
}

impl GeneratedPlan {
  pub fn overview(&self) -> PlanOverview {
    match self {
      Self::Scheduled(plan) => PlanOverview::Weekly {
        days: plan
          .schedule
          .iter()
          .map(|entry| DayOverview {
            day: entry.day.clone(),
            workout_type: entry.workout_type.clone(),
            category: entry.category(),
            duration: entry.duration,
          })
          .collect(),
      },
      Self::Sectioned(plan) => PlanOverview::Sectioned {
        warm_up_minutes: plan.warm_up_minutes(),
        main_exercises: plan.sections.main_exercises.len(),
        cool_down_minutes: plan.cool_down_minutes(),
      },
    }
  }
}

impl From<PlanTemplate> for GeneratedPlan {
  fn from(plan: PlanTemplate) -> Self {
    Self::Scheduled(plan)
  }
}
