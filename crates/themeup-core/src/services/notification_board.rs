//! Visible-notification state shared by the poller and the resolver.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::UpdateRecord;
use crate::events::UpdateEvent;
use crate::ports::NotificationSinkPort;

/// Holds the update currently offered to the operator, if any.
///
/// The sink only hears about transitions: showing the same release twice or
/// hiding an already hidden board emits nothing.
pub struct NotificationBoard {
    pending: RwLock<Option<UpdateRecord>>,
    sink: Arc<dyn NotificationSinkPort>,
}

impl NotificationBoard {
    pub fn new(sink: Arc<dyn NotificationSinkPort>) -> Self {
        Self {
            pending: RwLock::new(None),
            sink,
        }
    }

    /// The update currently offered, if any.
    pub async fn pending(&self) -> Option<UpdateRecord> {
        self.pending.read().await.clone()
    }

    pub async fn is_visible(&self) -> bool {
        self.pending.read().await.is_some()
    }

    /// Offer `record`. Returns `true` if this changed what is visible.
    pub async fn show(&self, record: UpdateRecord) -> bool {
        let mut pending = self.pending.write().await;
        if pending.as_ref().is_some_and(|current| current.same_release(&record)) {
            return false;
        }

        debug!(version = %record.version, id = %record.id, "Showing update notification");
        *pending = Some(record.clone());
        drop(pending);
        self.sink.emit(UpdateEvent::NotificationShown { update: record });
        true
    }

    /// Dismiss the notification. Returns `true` if one was visible.
    pub async fn hide(&self) -> bool {
        let was_visible = self.pending.write().await.take().is_some();
        if was_visible {
            debug!("Hiding update notification");
            self.sink.emit(UpdateEvent::NotificationHidden);
        }
        was_visible
    }

    /// Forward an event to the sink.
    pub fn emit(&self, event: UpdateEvent) {
        self.sink.emit(event);
    }
}
