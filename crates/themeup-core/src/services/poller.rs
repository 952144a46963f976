//! Update poller - decides whether an update notification should be visible.
//!
//! Runs on a timer and on external nudges (the presenter regaining focus,
//! an explicit "check now"). Each check fetches the latest active record,
//! compares it with the installed version and shows or hides the
//! notification. Failed checks are logged and change nothing; the next
//! regular tick is the only retry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{ClientStateService, NotificationBoard, record_best_effort};
use crate::domain::{ActivityKind, ActivityLogEntry, UpdateChannel, UpdateRecord};
use crate::ports::{ActivityLogPort, CoreError, UpdateRegistryPort};

/// Minimum spacing between checks triggered by visibility changes.
pub const DEFAULT_VISIBILITY_COOLDOWN: Duration = Duration::from_secs(5 * 60);

/// What caused a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTrigger {
    /// Regular interval tick.
    Tick,
    /// The presenter became visible again. Throttled by the cooldown.
    VisibilityChange,
    /// Explicit request; never throttled.
    Force,
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A newer update is available and the notification is visible.
    UpdateAvailable(UpdateRecord),
    /// The latest active update is not newer than the installed version.
    UpToDate { current_version: String },
    /// The registry has no active update in this channel.
    NoActiveUpdate,
    /// The check was skipped because one ran recently.
    Skipped,
    /// The check failed; notification state was left unchanged.
    Failed(String),
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateAvailable(record) => {
                write!(f, "update {} available: {}", record.version, record.title)
            }
            Self::UpToDate { current_version } => write!(f, "up to date ({current_version})"),
            Self::NoActiveUpdate => f.write_str("no active update published"),
            Self::Skipped => f.write_str("skipped (checked recently)"),
            Self::Failed(error) => write!(f, "check failed: {error}"),
        }
    }
}

/// Periodic update checker.
pub struct UpdatePoller {
    registry: Arc<dyn UpdateRegistryPort>,
    state: Arc<ClientStateService>,
    activity: Arc<dyn ActivityLogPort>,
    board: Arc<NotificationBoard>,
    channel: UpdateChannel,
    interval: Duration,
    visibility_cooldown: Duration,
    // Held for the whole check, so checks never overlap.
    last_check: Mutex<Option<Instant>>,
}

impl UpdatePoller {
    pub fn new(
        registry: Arc<dyn UpdateRegistryPort>,
        state: Arc<ClientStateService>,
        activity: Arc<dyn ActivityLogPort>,
        board: Arc<NotificationBoard>,
        channel: UpdateChannel,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            state,
            activity,
            board,
            channel,
            interval,
            visibility_cooldown: DEFAULT_VISIBILITY_COOLDOWN,
            last_check: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn with_visibility_cooldown(mut self, cooldown: Duration) -> Self {
        self.visibility_cooldown = cooldown;
        self
    }

    pub const fn channel(&self) -> UpdateChannel {
        self.channel
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one check. Never fails; errors become [`PollOutcome::Failed`].
    pub async fn check(&self, trigger: PollTrigger) -> PollOutcome {
        let mut last_check = self.last_check.lock().await;

        if trigger == PollTrigger::VisibilityChange
            && last_check.is_some_and(|at| at.elapsed() < self.visibility_cooldown)
        {
            debug!("Skipping visibility-triggered check inside cooldown");
            return PollOutcome::Skipped;
        }

        match self.try_check().await {
            Ok(outcome) => {
                *last_check = Some(Instant::now());
                debug!(?trigger, %outcome, "Update check finished");
                outcome
            }
            Err(e) => {
                warn!(?trigger, error = %e, "Update check failed; notification state unchanged");
                PollOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_check(&self) -> Result<PollOutcome, CoreError> {
        let latest = self
            .registry
            .latest_active(self.channel)
            .await?
            .filter(|record| record.is_active);
        // Read after the fetch so an apply that lands mid-request is seen.
        let state = self.state.current().await?;

        let Some(record) = latest else {
            self.board.hide().await;
            return Ok(PollOutcome::NoActiveUpdate);
        };

        if record.is_newer_than(&state.current_version) {
            if self.board.show(record.clone()).await {
                info!(
                    current = %state.current_version,
                    available = %record.version,
                    "New theme update available"
                );
                record_best_effort(
                    self.activity.as_ref(),
                    ActivityLogEntry::for_update(&state.client_id, &record, ActivityKind::Notified),
                )
                .await;
            }
            Ok(PollOutcome::UpdateAvailable(record))
        } else {
            self.board.hide().await;
            Ok(PollOutcome::UpToDate {
                current_version: state.current_version,
            })
        }
    }

    /// Poll until `cancel` fires.
    ///
    /// Checks once immediately, then every interval, plus once per trigger
    /// received on `triggers`. A closed trigger channel leaves the timer
    /// running.
    pub async fn run(&self, mut triggers: mpsc::Receiver<PollTrigger>, cancel: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut triggers_open = true;

        info!(
            channel = %self.channel,
            interval_secs = self.interval.as_secs(),
            "Starting update poller"
        );

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!("Update poller cancelled");
                    break;
                }
                trigger = triggers.recv(), if triggers_open => match trigger {
                    Some(trigger) => {
                        self.check(trigger).await;
                    }
                    None => triggers_open = false,
                },
                _ = ticker.tick() => {
                    self.check(PollTrigger::Tick).await;
                }
            }
        }
    }
}
