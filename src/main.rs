//! Adaptive planner CLI
//!
//! ```bash
//! # Generate a plan (remote first, local fallback) and print it as JSON
//! adaptive-planner generate --preferences prefs.json
//!
//! # Skip the generation endpoint entirely
//! adaptive-planner generate --preferences prefs.json --offline --gender female
//!
//! # List the weekdays, focus areas and cycle phases a preferences file may use
//! adaptive-planner options
//!
//! # Generate, then put the plan on the calendar
//! PLANNER_AUTH_TOKEN=... PLANNER_USER_ID=7 adaptive-planner schedule --preferences prefs.json
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adaptive_planner_lib::commands::{
  generate_plan, planner_options, refresh_scheduled_workouts, resolve_gender, schedule_plan,
  PlanResult, PlanSource,
};
use adaptive_planner_lib::models::PreferenceInput;
use adaptive_planner_lib::scheduling::local_today;
use adaptive_planner_lib::{init_tracing, initialize_state, select_fallback_plan, AppState};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
  name = "adaptive-planner",
  about = "Generate weekly workout plans and schedule them on the calendar"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Command {
  /// List the choices accepted in a preferences file
  Options,
  /// Generate a plan and print it as JSON
  Generate(PlanArgs),
  /// Generate a plan and schedule each of its days
  Schedule {
    #[command(flatten)]
    plan: PlanArgs,

    /// Schedule relative to this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<NaiveDate>,
  },
}

#[derive(Args)]
struct PlanArgs {
  /// Preferences JSON file, or "-" for stdin
  #[arg(long, short = 'p')]
  preferences: PathBuf,

  /// Override the gender used for cycle-aware plans
  #[arg(long)]
  gender: Option<String>,

  /// Use the local fallback plan without calling the generation endpoint
  #[arg(long)]
  offline: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
  dotenvy::dotenv().ok();
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli.command).await {
    Ok(code) => code,
    Err(e) => {
      error!("{}", e);
      ExitCode::FAILURE
    }
  }
}

async fn run(command: Command) -> CliResult<ExitCode> {
  match command {
    Command::Options => {
      println!("{}", serde_json::to_string_pretty(&planner_options())?);
      Ok(ExitCode::SUCCESS)
    }
    Command::Generate(args) => {
      let state = initialize_state()?;
      let prefs = read_preferences(&args.preferences)?;
      let result = plan_from_args(&state, &args, &prefs).await?;
      println!("{}", serde_json::to_string_pretty(&result)?);
      Ok(ExitCode::SUCCESS)
    }
    Command::Schedule { plan, today } => {
      let state = initialize_state()?;
      let prefs = read_preferences(&plan.preferences)?;
      let result = plan_from_args(&state, &plan, &prefs).await?;
      let mut events = state.events.subscribe();

      let summary = schedule_plan(
        &state,
        &result.plan,
        prefs.cycle_phase(),
        today.unwrap_or_else(local_today),
      )
      .await?;

      println!("{}", serde_json::to_string_pretty(&summary)?);
      println!("{}", summary.message());

      if events.try_recv().is_ok() {
        match refresh_scheduled_workouts(&state).await {
          Ok(workouts) => info!(total = workouts.len(), "Calendar refreshed"),
          Err(e) => warn!(error = %e, "Calendar refresh failed"),
        }
      }

      Ok(if summary.is_success() {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      })
    }
  }
}

async fn plan_from_args(
  state: &AppState,
  args: &PlanArgs,
  prefs: &PreferenceInput,
) -> CliResult<PlanResult> {
  let gender = match &args.gender {
    Some(g) => Some(g.to_lowercase()),
    None => resolve_gender(state).await,
  };

  if args.offline {
    return Ok(PlanResult::new(
      select_fallback_plan(prefs, gender.as_deref()).into(),
      PlanSource::Fallback,
    ));
  }

  Ok(generate_plan(state, prefs, gender.as_deref()).await)
}

fn read_preferences(path: &Path) -> CliResult<PreferenceInput> {
  let raw = if path.as_os_str() == "-" {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    buffer
  } else {
    std::fs::read_to_string(path)
      .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
  };

  Ok(serde_json::from_str(&raw)?)
}
