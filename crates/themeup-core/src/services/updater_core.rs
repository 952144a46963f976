//! `UpdaterCore` - the single entry point adapters use to run the update flow.
//!
//! Wires the services together over one shared [`NotificationBoard`], so the
//! poller and the resolver always agree on what is visible.

use std::sync::Arc;

use super::{ClientStateService, NotificationBoard, UpdatePoller, UpdateResolver};
use crate::ports::UpdaterPorts;
use crate::settings::UpdaterSettings;

/// Aggregate of the update services.
pub struct UpdaterCore {
    state: Arc<ClientStateService>,
    board: Arc<NotificationBoard>,
    poller: Arc<UpdatePoller>,
    resolver: UpdateResolver,
}

impl UpdaterCore {
    /// Create the core from port implementations and settings.
    ///
    /// Automatic updates are offered only when an apply port is present and
    /// the settings carry both the endpoint URL and its key.
    pub fn new(ports: UpdaterPorts, settings: &UpdaterSettings) -> Self {
        let automatic = ports.apply.is_some() && settings.automatic_updates_supported();

        let state = Arc::new(ClientStateService::new(
            ports.state,
            settings.initial_version.clone(),
            automatic,
        ));
        let board = Arc::new(NotificationBoard::new(ports.sink));
        let poller = Arc::new(UpdatePoller::new(
            ports.registry,
            Arc::clone(&state),
            Arc::clone(&ports.activity),
            Arc::clone(&board),
            settings.channel,
            settings.poll_interval(),
        ));
        let resolver = UpdateResolver::new(
            Arc::clone(&board),
            Arc::clone(&state),
            ports.activity,
            ports.apply,
            settings.create_backup,
        );

        Self {
            state,
            board,
            poller,
            resolver,
        }
    }

    /// Access the client state service.
    pub fn state(&self) -> &ClientStateService {
        &self.state
    }

    /// Access the notification board.
    pub fn board(&self) -> &NotificationBoard {
        &self.board
    }

    /// Access the poller. Shared so it can be moved into a spawned task.
    pub fn poller(&self) -> Arc<UpdatePoller> {
        Arc::clone(&self.poller)
    }

    /// Access the resolver.
    pub const fn resolver(&self) -> &UpdateResolver {
        &self.resolver
    }
}
