//! Core services - the update flow's business logic.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete implementations.

mod client_state;
mod notification_board;
mod poller;
mod resolver;
mod updater_core;

pub use client_state::ClientStateService;
pub use notification_board::NotificationBoard;
pub use poller::{DEFAULT_VISIBILITY_COOLDOWN, PollOutcome, PollTrigger, UpdatePoller};
pub use resolver::{AppliedUpdate, ManualInstructions, UpdateResolver};
pub use updater_core::UpdaterCore;

use tracing::warn;

use crate::domain::ActivityLogEntry;
use crate::ports::ActivityLogPort;

/// Write an activity row, logging instead of failing.
async fn record_best_effort(log: &dyn ActivityLogPort, entry: ActivityLogEntry) {
    if let Err(e) = log.record(&entry).await {
        warn!(
            activity = %entry.activity,
            version = %entry.version,
            error = %e,
            "Failed to write activity log entry"
        );
    }
}
