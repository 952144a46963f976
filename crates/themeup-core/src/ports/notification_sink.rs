//! Notification sink trait.
//!
//! This is the seam between the update flow and whatever renders it
//! (terminal, GUI, web socket). Implementations handle transport details.

use crate::events::UpdateEvent;

/// Receives [`UpdateEvent`]s from the poller and resolver.
///
/// `emit` must not block; buffer or hand off if rendering is slow.
pub trait NotificationSinkPort: Send + Sync {
    fn emit(&self, event: UpdateEvent);
}
