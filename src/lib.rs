pub mod api;
pub mod commands;
pub mod config;
pub mod events;
pub mod fallback;
pub mod models;
pub mod scheduling;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use fallback::select_fallback_plan;
pub use scheduling::{map_schedule, next_occurrence};
pub use state::{initialize_state, AppState};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins when set; otherwise `info`,
/// or `debug` with `verbose`.
pub fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}
