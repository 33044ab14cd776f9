pub mod plan;
pub mod schedule;

pub use plan::{
  generate_plan, planner_options, resolve_gender, PlanResult, PlanSource, PlannerOptions,
};
pub use schedule::{refresh_scheduled_workouts, schedule_plan, ScheduleError};
