pub mod plan;
pub mod preferences;
pub mod weekday;

pub use plan::{
  DayCategory, DaySchedule, ExerciseEntry, GeneratedPlan, PlanOverview, PlanTemplate, SectionedPlan,
};
pub use preferences::{CyclePhase, FitnessLevel, PreferenceInput};
