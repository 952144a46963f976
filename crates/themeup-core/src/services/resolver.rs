//! Update resolver - the three ways an operator can resolve a notification.
//!
//! * automatic: ask the remote apply endpoint to install the package
//! * manual: hand the operator the package URL and install steps
//! * mark applied: trust the operator that the files are already in place
//!
//! Every resolution needs a visible notification and fails with
//! [`CoreError::NoPendingUpdate`] otherwise.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{ClientStateService, NotificationBoard, record_best_effort};
use crate::domain::{ActivityKind, ActivityLogEntry, ClientState, UpdateRecord};
use crate::events::{MANUAL_INSTALL_STEPS, UpdateEvent};
use crate::ports::{ActivityLogPort, ApplyEndpointPort, ApplyRequest, CoreError};

/// Result of a successful automatic apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedUpdate {
    pub version: String,
    pub message: Option<String>,
    pub files_updated: Option<u32>,
    pub backup_created: bool,
}

/// What the operator needs for a manual install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualInstructions {
    pub version: String,
    pub package_url: String,
    pub steps: Vec<String>,
}

/// Resolves the pending notification.
pub struct UpdateResolver {
    board: Arc<NotificationBoard>,
    state: Arc<ClientStateService>,
    activity: Arc<dyn ActivityLogPort>,
    apply: Option<Arc<dyn ApplyEndpointPort>>,
    create_backup: bool,
    // One resolution at a time; an apply in flight is not cancellable.
    busy: Mutex<()>,
}

impl UpdateResolver {
    pub fn new(
        board: Arc<NotificationBoard>,
        state: Arc<ClientStateService>,
        activity: Arc<dyn ActivityLogPort>,
        apply: Option<Arc<dyn ApplyEndpointPort>>,
        create_backup: bool,
    ) -> Self {
        Self {
            board,
            state,
            activity,
            apply,
            create_backup,
            busy: Mutex::new(()),
        }
    }

    /// Install the pending update through the remote apply endpoint.
    ///
    /// On success the installed version is recorded, the notification is
    /// hidden and a reload is requested. On any failure, including a failed
    /// write of the installed version, a `failed` row is logged and the
    /// notification stays up.
    pub async fn apply_automatic(&self) -> Result<AppliedUpdate, CoreError> {
        let _busy = self.busy.lock().await;
        let record = self.pending().await?;
        let state = self.state.current().await?;

        let endpoint = match &self.apply {
            Some(endpoint) if state.automatic_updates_supported => endpoint,
            _ => return Err(CoreError::AutomaticUnsupported),
        };

        self.log(&state, &record, ActivityKind::Started, None).await;

        let request = ApplyRequest {
            download_url: record.package_url.clone(),
            version: record.version.clone(),
            client_id: state.client_id.clone(),
            create_backup: self.create_backup,
        };
        info!(version = %record.version, backup = self.create_backup, "Requesting automatic update");

        let outcome = match endpoint.apply(&request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = e.to_string();
                self.fail(&state, &record, &message).await;
                return Err(e.into());
            }
        };

        if !outcome.success {
            let message = outcome
                .message
                .unwrap_or_else(|| "Apply endpoint reported failure".to_string());
            self.fail(&state, &record, &message).await;
            return Err(CoreError::ApplyRejected {
                version: record.version,
                message,
            });
        }

        if let Err(e) = self.state.record_applied(&record.version).await {
            let message = format!("Update installed but the local version could not be saved: {e}");
            self.fail(&state, &record, &message).await;
            return Err(e);
        }
        self.log(
            &state,
            &record,
            ActivityKind::Completed,
            outcome.message.clone(),
        )
        .await;
        self.board.hide().await;

        self.board.emit(UpdateEvent::UpdateApplied {
            version: record.version.clone(),
            files_updated: outcome.files_updated,
            backup_created: outcome.backup_created,
        });
        self.board.emit(UpdateEvent::ReloadRequested {
            version: record.version.clone(),
        });
        info!(
            version = %record.version,
            files_updated = ?outcome.files_updated,
            "Automatic update applied"
        );

        Ok(AppliedUpdate {
            version: record.version,
            message: outcome.message,
            files_updated: outcome.files_updated,
            backup_created: outcome.backup_created,
        })
    }

    /// Hand the operator the package URL and install steps.
    ///
    /// The installed version is not touched and the notification stays up.
    pub async fn apply_manual(&self) -> Result<ManualInstructions, CoreError> {
        let _busy = self.busy.lock().await;
        let record = self.pending().await?;
        let state = self.state.current().await?;

        self.log(&state, &record, ActivityKind::ManualDownload, None)
            .await;
        self.board.emit(UpdateEvent::manual_instructions(&record));

        Ok(ManualInstructions {
            version: record.version,
            package_url: record.package_url,
            steps: MANUAL_INSTALL_STEPS.iter().map(ToString::to_string).collect(),
        })
    }

    /// Record the pending update as installed without verifying anything.
    ///
    /// Never calls the apply endpoint. Returns the record that was resolved.
    pub async fn mark_applied(&self) -> Result<UpdateRecord, CoreError> {
        let _busy = self.busy.lock().await;
        let record = self.pending().await?;
        let state = self.state.current().await?;

        if !self.state.record_applied(&record.version).await? {
            warn!(version = %record.version, "Marked applied but stored version was not older");
        }
        self.board.hide().await;
        self.log(&state, &record, ActivityKind::MarkedApplied, None)
            .await;
        info!(version = %record.version, "Update marked as applied by operator");

        Ok(record)
    }

    async fn pending(&self) -> Result<UpdateRecord, CoreError> {
        self.board.pending().await.ok_or(CoreError::NoPendingUpdate)
    }

    async fn fail(&self, state: &ClientState, record: &UpdateRecord, message: &str) {
        warn!(version = %record.version, error = %message, "Automatic update failed");
        self.log(
            state,
            record,
            ActivityKind::Failed,
            Some(message.to_string()),
        )
        .await;
        self.board.emit(UpdateEvent::ApplyFailed {
            version: record.version.clone(),
            error: message.to_string(),
        });
    }

    async fn log(
        &self,
        state: &ClientState,
        record: &UpdateRecord,
        kind: ActivityKind,
        message: Option<String>,
    ) {
        let mut entry = ActivityLogEntry::for_update(&state.client_id, record, kind);
        entry.message = message;
        record_best_effort(self.activity.as_ref(), entry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpdateChannel;
    use crate::ports::activity_log::testing::MemoryActivityLog;
    use crate::ports::apply_endpoint::MockApplyEndpointPort;
    use crate::ports::notification_sink::testing::RecordingSink;
    use crate::ports::{ApplyError, ApplyOutcome};
    use crate::services::client_state::testing::MemoryStateRepo;
    use chrono::Utc;

    fn record(version: &str) -> UpdateRecord {
        UpdateRecord {
            id: "17".to_string(),
            version: version.to_string(),
            title: "Spring refresh".to_string(),
            description: None,
            package_url: format!("https://cdn.example.com/theme-{version}.zip"),
            is_active: true,
            channel: UpdateChannel::Stable,
            created_at: Utc::now(),
        }
    }

    struct Fixture {
        repo: Arc<MemoryStateRepo>,
        sink: Arc<RecordingSink>,
        log: Arc<MemoryActivityLog>,
        board: Arc<NotificationBoard>,
        resolver: UpdateResolver,
    }

    async fn fixture(apply: Option<MockApplyEndpointPort>, pending: Option<&str>) -> Fixture {
        let repo = Arc::new(MemoryStateRepo::with_version("1.0.0"));
        let sink = Arc::new(RecordingSink::default());
        let log = Arc::new(MemoryActivityLog::default());
        let board = Arc::new(NotificationBoard::new(sink.clone()));
        if let Some(version) = pending {
            board.show(record(version)).await;
        }
        let state = Arc::new(ClientStateService::new(repo.clone(), "1.0.0", true));
        let apply = apply.map(|mock| Arc::new(mock) as Arc<dyn ApplyEndpointPort>);
        let resolver = UpdateResolver::new(board.clone(), state, log.clone(), apply, true);
        Fixture {
            repo,
            sink,
            log,
            board,
            resolver,
        }
    }

    fn version(f: &Fixture) -> String {
        f.repo.stored().unwrap().current_version
    }

    #[tokio::test]
    async fn test_automatic_success_records_version_and_hides() {
        let mut mock = MockApplyEndpointPort::new();
        mock.expect_apply()
            .withf(|req| {
                req.version == "1.1.0"
                    && req.download_url.ends_with("theme-1.1.0.zip")
                    && req.create_backup
                    && req.client_id.as_str() == "client_fixture"
            })
            .times(1)
            .returning(|_| {
                Ok(ApplyOutcome {
                    success: true,
                    message: Some("Theme updated".to_string()),
                    files_updated: Some(12),
                    backup_created: true,
                })
            });
        let f = fixture(Some(mock), Some("1.1.0")).await;

        let applied = f.resolver.apply_automatic().await.unwrap();

        assert_eq!(applied.files_updated, Some(12));
        assert_eq!(version(&f), "1.1.0");
        assert!(!f.board.is_visible().await);
        assert_eq!(
            f.log.kinds(),
            vec![ActivityKind::Started, ActivityKind::Completed]
        );
        assert_eq!(
            f.sink.names(),
            vec![
                "notification_shown",
                "notification_hidden",
                "update_applied",
                "reload_requested"
            ]
        );
    }

    #[tokio::test]
    async fn test_automatic_success_with_failed_version_write_logs_failure() {
        let mut mock = MockApplyEndpointPort::new();
        mock.expect_apply().times(1).returning(|_| {
            Ok(ApplyOutcome {
                success: true,
                message: Some("Theme updated".to_string()),
                files_updated: Some(3),
                backup_created: false,
            })
        });
        let f = fixture(Some(mock), Some("1.1.0")).await;
        f.repo.fail_saves();

        let err = f.resolver.apply_automatic().await.unwrap_err();

        assert!(matches!(err, CoreError::Repository(_)));
        assert_eq!(version(&f), "1.0.0");
        assert!(f.board.is_visible().await);
        assert_eq!(f.log.kinds(), vec![ActivityKind::Started, ActivityKind::Failed]);
        let failed = f.log.entries().pop().unwrap();
        assert!(failed.message.unwrap().contains("could not be saved"));
        assert_eq!(f.sink.names(), vec!["notification_shown", "apply_failed"]);
    }

    #[tokio::test]
    async fn test_automatic_rejection_leaves_state_unchanged() {
        let mut mock = MockApplyEndpointPort::new();
        mock.expect_apply().times(1).returning(|_| {
            Ok(ApplyOutcome {
                success: false,
                message: Some("Invalid API key".to_string()),
                files_updated: None,
                backup_created: false,
            })
        });
        let f = fixture(Some(mock), Some("1.1.0")).await;

        let err = f.resolver.apply_automatic().await.unwrap_err();

        assert!(
            matches!(err, CoreError::ApplyRejected { ref message, .. } if message == "Invalid API key")
        );
        assert_eq!(version(&f), "1.0.0");
        assert!(f.board.is_visible().await);
        assert_eq!(
            f.log.kinds(),
            vec![ActivityKind::Started, ActivityKind::Failed]
        );
        assert_eq!(
            f.log.entries()[1].message.as_deref(),
            Some("Invalid API key")
        );
        assert_eq!(f.sink.names().last(), Some(&"apply_failed"));
    }

    #[tokio::test]
    async fn test_automatic_transport_error_leaves_state_unchanged() {
        let mut mock = MockApplyEndpointPort::new();
        mock.expect_apply().times(1).returning(|_| {
            Err(ApplyError::Network {
                message: "timed out".to_string(),
            })
        });
        let f = fixture(Some(mock), Some("1.1.0")).await;

        let err = f.resolver.apply_automatic().await.unwrap_err();

        assert!(matches!(err, CoreError::Apply(ApplyError::Network { .. })));
        assert_eq!(version(&f), "1.0.0");
        assert!(f.board.is_visible().await);
    }

    #[tokio::test]
    async fn test_automatic_without_endpoint_is_unsupported() {
        let f = fixture(None, Some("1.1.0")).await;

        let err = f.resolver.apply_automatic().await.unwrap_err();

        assert!(matches!(err, CoreError::AutomaticUnsupported));
        assert!(f.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_manual_returns_instructions_without_version_change() {
        let f = fixture(None, Some("1.1.0")).await;

        let instructions = f.resolver.apply_manual().await.unwrap();

        assert_eq!(
            instructions.package_url,
            "https://cdn.example.com/theme-1.1.0.zip"
        );
        assert_eq!(instructions.steps.len(), MANUAL_INSTALL_STEPS.len());
        assert_eq!(version(&f), "1.0.0");
        assert!(f.board.is_visible().await);
        assert_eq!(f.log.kinds(), vec![ActivityKind::ManualDownload]);
        assert_eq!(f.sink.names().last(), Some(&"manual_instructions"));
    }

    #[tokio::test]
    async fn test_mark_applied_never_calls_endpoint() {
        let mut mock = MockApplyEndpointPort::new();
        mock.expect_apply().times(0);
        let f = fixture(Some(mock), Some("1.1.0")).await;

        let resolved = f.resolver.mark_applied().await.unwrap();

        assert_eq!(resolved.version, "1.1.0");
        assert_eq!(version(&f), "1.1.0");
        assert!(!f.board.is_visible().await);
        assert_eq!(f.log.kinds(), vec![ActivityKind::MarkedApplied]);
    }

    #[tokio::test]
    async fn test_resolutions_require_pending_update() {
        let f = fixture(None, None).await;

        assert!(matches!(
            f.resolver.apply_automatic().await,
            Err(CoreError::NoPendingUpdate)
        ));
        assert!(matches!(
            f.resolver.apply_manual().await,
            Err(CoreError::NoPendingUpdate)
        ));
        assert!(matches!(
            f.resolver.mark_applied().await,
            Err(CoreError::NoPendingUpdate)
        ));
    }
}
