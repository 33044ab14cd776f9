//! Planner notifications for secondary observers
//!
//! Callers of scheduling get their result directly; this bus only exists so
//! other views (a calendar, a summary panel) can refresh their own data.
//! Delivery is best effort: publishing with no subscribers, or to a
//! subscriber that has fallen behind, is not an error.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlannerEvent {
  /// Something was added to the calendar; listeners should re-fetch
  WorkoutsScheduled { count: usize },
}

#[derive(Debug, Clone)]
pub struct EventBus {
  sender: broadcast::Sender<PlannerEvent>,
}

impl Default for EventBus {
  fn default() -> Self {
    Self::new()
  }
}

impl EventBus {
  pub fn new() -> Self {
    let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
    Self { sender }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
    self.sender.subscribe()
  }

  /// Fire and forget; returns how many subscribers were reached
  pub fn publish(&self, event: PlannerEvent) -> usize {
    match self.sender.send(event) {
      Ok(receivers) => receivers,
      Err(broadcast::error::SendError(event)) => {
        debug!(?event, "No subscribers for planner event");
        0
      }
    }
  }
}
