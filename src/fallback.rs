//! Local fallback plan selection
//!
//! When the generation endpoint is unreachable or returns something unusable
//! we still show a plan. Selection is a pure lookup:
//! - female + recognised cycle phase -> that phase's template
//! - female + unrecognised phase     -> follicular template
//! - everyone else                   -> general template
//!
//! The chosen template is then personalised: difficulty from the fitness
//! level, workout count and the first three day labels from the selected days.

use crate::models::plan::{DaySchedule, ExerciseEntry, PlanTemplate};
use crate::models::preferences::{is_female, CyclePhase, PreferenceInput};
use crate::models::weekday::label_for_id;

/// Only this many leading schedule entries take their day from the selection
const RELABELED_DAYS: usize = 3;

/// Pick and personalise a fallback plan. Never fails.
pub fn select_fallback_plan(prefs: &PreferenceInput, gender: Option<&str>) -> PlanTemplate {
  let mut plan = match prefs.cycle_phase() {
    Some(phase) if is_female(gender) => {
      cycle_template(CyclePhase::parse(phase).unwrap_or(CyclePhase::Follicular))
    }
    _ => general_template(),
  };

  personalize(&mut plan, prefs);
  plan
}

fn personalize(plan: &mut PlanTemplate, prefs: &PreferenceInput) {
  if let Some(level) = prefs.fitness_level {
    plan.difficulty = level.label().to_string();
  }

  if !prefs.workout_days.is_empty() {
    plan.total_workouts = prefs.workout_days.len() as u32;
  }

  for (entry, day_id) in plan
    .schedule
    .iter_mut()
    .zip(prefs.workout_days.iter())
    .take(RELABELED_DAYS)
  {
    if let Some(label) = label_for_id(day_id) {
      entry.day = label.to_string();
    }
  }
}

/// ---------------------------------------------------------------------------
/// Template table
/// ---------------------------------------------------------------------------

fn day(
  label: &str,
  workout_type: &str,
  duration: u32,
  calories: u32,
  exercises: Vec<ExerciseEntry>,
) -> DaySchedule {
  DaySchedule {
    day: label.to_string(),
    workout_type: workout_type.to_string(),
    duration,
    exercises,
    calories,
  }
}

fn template(
  name: &str,
  difficulty: &str,
  total_workouts: u32,
  estimated_calories: u32,
  schedule: Vec<DaySchedule>,
) -> PlanTemplate {
  PlanTemplate {
    name: name.to_string(),
    duration: "Weekly".to_string(),
    difficulty: difficulty.to_string(),
    total_workouts,
    estimated_calories,
    schedule,
  }
}

pub fn cycle_template(phase: CyclePhase) -> PlanTemplate {
  match phase {
    CyclePhase::Menstrual => menstrual_template(),
    CyclePhase::Follicular => follicular_template(),
    CyclePhase::Ovulation => ovulation_template(),
    CyclePhase::Luteal => luteal_template(),
  }
}

fn menstrual_template() -> PlanTemplate {
  template(
    "Menstrual Phase Recovery Program",
    "Beginner",
    3,
    1000,
    vec![
      day("Monday", "Gentle Recovery", 20, 80, vec![
        ExerciseEntry::new("Gentle Yoga Flow", 1, "15 min", "0s")
          .with_note("Focus on relaxation and gentle stretching"),
        ExerciseEntry::new("Light Walking", 1, "10 min", "0s")
          .with_note("Low intensity, focus on movement"),
        ExerciseEntry::new("Deep Breathing", 1, "5 min", "0s")
          .with_note("Stress relief and relaxation"),
      ]),
      day("Wednesday", "Restorative Stretching", 25, 60, vec![
        ExerciseEntry::new("Hip Flexor Stretches", 2, "hold 30s each", "15s")
          .with_note("Helps with menstrual cramps"),
        ExerciseEntry::new("Lower Back Stretches", 2, "hold 30s each", "15s")
          .with_note("Relieves lower back tension"),
        ExerciseEntry::new("Gentle Core Breathing", 1, "10 breaths", "0s")
          .with_note("Supports pelvic floor"),
      ]),
      day("Friday", "Light Movement", 20, 50, vec![
        ExerciseEntry::new("Seated Leg Lifts", 2, "10 each leg", "30s")
          .with_note("Gentle lower body movement"),
        ExerciseEntry::new("Arm Circles", 2, "15 each direction", "20s")
          .with_note("Upper body mobility"),
        ExerciseEntry::new("Meditation", 1, "10 min", "0s").with_note("Mental wellness focus"),
      ]),
    ],
  )
}

fn follicular_template() -> PlanTemplate {
  template(
    "Follicular Phase Strength Program",
    "Intermediate",
    4,
    1800,
    vec![
      day("Monday", "Upper Body Strength", 40, 220, vec![
        ExerciseEntry::new("Push-ups", 3, "10-12", "60s").with_note("Build upper body strength"),
        ExerciseEntry::new("Dumbbell Rows", 3, "12-15", "60s").with_note("Back and shoulders"),
        ExerciseEntry::new("Shoulder Press", 3, "10-12", "60s").with_note("Shoulder development"),
        ExerciseEntry::new("Bicep Curls", 3, "12-15", "45s").with_note("Arm strength"),
      ]),
      day("Wednesday", "Lower Body Strength", 40, 200, vec![
        ExerciseEntry::new("Squats", 3, "12-15", "60s").with_note("Lower body foundation"),
        ExerciseEntry::new("Lunges", 3, "10 each leg", "60s").with_note("Leg strength and balance"),
        ExerciseEntry::new("Glute Bridges", 3, "15-20", "45s").with_note("Posterior chain"),
        ExerciseEntry::new("Calf Raises", 3, "15-20", "30s").with_note("Lower leg strength"),
      ]),
      day("Friday", "Full Body Strength", 45, 250, vec![
        ExerciseEntry::new("Deadlifts", 3, "8-10", "90s").with_note("Full body compound movement"),
        ExerciseEntry::new("Overhead Press", 3, "8-10", "60s").with_note("Core and shoulders"),
        ExerciseEntry::new("Plank", 3, "hold 30-45s", "30s").with_note("Core stability"),
      ]),
    ],
  )
}

fn ovulation_template() -> PlanTemplate {
  template(
    "Ovulation Phase Peak Performance",
    "Advanced",
    5,
    2200,
    vec![
      day("Monday", "High-Intensity Strength", 45, 300, vec![
        ExerciseEntry::new("Barbell Squats", 4, "8-10", "90s").with_note("Peak strength training"),
        ExerciseEntry::new("Bench Press", 4, "6-8", "90s").with_note("Upper body power"),
        ExerciseEntry::new("Pull-ups", 3, "8-10", "60s").with_note("Back strength"),
        ExerciseEntry::new("Overhead Press", 3, "8-10", "60s").with_note("Shoulder power"),
      ]),
      day("Wednesday", "HIIT Cardio", 30, 280, vec![
        ExerciseEntry::new("Sprint Intervals", 6, "30s on/30s off", "30s")
          .with_note("Maximum intensity"),
        ExerciseEntry::new("Burpees", 4, "10-12", "45s").with_note("Full body power"),
        ExerciseEntry::new("Jump Squats", 3, "15", "45s").with_note("Explosive lower body"),
      ]),
      day("Friday", "Power Training", 40, 270, vec![
        ExerciseEntry::new("Power Cleans", 4, "5-6", "120s").with_note("Peak power output"),
        ExerciseEntry::new("Box Jumps", 3, "8-10", "60s").with_note("Explosive power"),
        ExerciseEntry::new("Medicine Ball Slams", 3, "12-15", "45s").with_note("Full body power"),
      ]),
    ],
  )
}

fn luteal_template() -> PlanTemplate {
  template(
    "Luteal Phase Endurance Program",
    "Intermediate",
    4,
    1600,
    vec![
      day("Monday", "Moderate Cardio", 35, 200, vec![
        ExerciseEntry::new("Steady-State Running", 1, "25 min", "0s")
          .with_note("Moderate pace, focus on endurance"),
        ExerciseEntry::new("Walking Intervals", 3, "3 min fast/2 min slow", "0s")
          .with_note("Sustained effort"),
      ]),
      day("Wednesday", "Endurance Strength", 40, 180, vec![
        ExerciseEntry::new("Circuit Training", 3, "12-15 each", "30s")
          .with_note("Full body endurance"),
        ExerciseEntry::new("Bodyweight Exercises", 3, "15-20", "45s")
          .with_note("Sustained strength"),
        ExerciseEntry::new("Core Endurance", 3, "hold 45-60s", "30s").with_note("Core stability"),
      ]),
      day("Friday", "Moderate Flexibility", 30, 120, vec![
        ExerciseEntry::new("Yoga Flow", 1, "20 min", "0s")
          .with_note("Stress relief and flexibility"),
        ExerciseEntry::new("Stretching Routine", 1, "10 min", "0s")
          .with_note("Full body mobility"),
      ]),
    ],
  )
}

pub fn general_template() -> PlanTemplate {
  template(
    "Personalized Workout Program",
    "Beginner",
    3,
    1600,
    vec![
      day("Monday", "Strength Training", 35, 200, vec![
        ExerciseEntry::new("Push-ups", 3, "10-12", "60s"),
        ExerciseEntry::new("Squats", 3, "12-15", "60s"),
        ExerciseEntry::new("Plank", 3, "hold 30-45s", "30s"),
        ExerciseEntry::new("Lunges", 3, "10 each leg", "60s"),
      ]),
      day("Wednesday", "Cardio", 30, 190, vec![
        ExerciseEntry::new("Running", 1, "20 min", "0s"),
        ExerciseEntry::new("Jumping Jacks", 3, "30s", "30s"),
      ]),
      day("Friday", "Flexibility & Recovery", 30, 120, vec![
        ExerciseEntry::new("Yoga Flow", 1, "20 min", "0s"),
        ExerciseEntry::new("Stretching", 1, "10 min", "0s"),
      ]),
    ],
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
