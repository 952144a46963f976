//! Activity log port.
//!
//! Activity rows are an append-only audit trail. Writing them is best-effort
//! from the update flow's point of view: a failed write is logged and the
//! flow carries on.

use std::sync::Arc;

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ActivityLogEntry;

/// Append-only sink for [`ActivityLogEntry`] rows.
#[async_trait]
pub trait ActivityLogPort: Send + Sync {
    async fn record(&self, entry: &ActivityLogEntry) -> Result<(), RepositoryError>;
}

/// Writes every entry to each inner log in order.
///
/// All logs are attempted even if an earlier one fails; the first error is
/// returned.
#[derive(Clone, Default)]
pub struct CompositeActivityLog {
    logs: Vec<Arc<dyn ActivityLogPort>>,
}

impl CompositeActivityLog {
    pub fn new(logs: Vec<Arc<dyn ActivityLogPort>>) -> Self {
        Self { logs }
    }

    #[must_use]
    pub fn with(mut self, log: Arc<dyn ActivityLogPort>) -> Self {
        self.logs.push(log);
        self
    }
}

#[async_trait]
impl ActivityLogPort for CompositeActivityLog {
    async fn record(&self, entry: &ActivityLogEntry) -> Result<(), RepositoryError> {
        let mut first_error = None;
        for log in &self.logs {
            if let Err(e) = log.record(entry).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryActivityLog;
    use super::*;
    use crate::domain::{ActivityKind, ClientId};
    use chrono::Utc;

    fn entry() -> ActivityLogEntry {
        ActivityLogEntry {
            client_id: ClientId::from_stored("client_test"),
            update_id: "42".to_string(),
            version: "1.1.0".to_string(),
            activity: ActivityKind::Started,
            message: None,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_composite_writes_to_all_logs() {
        let a = Arc::new(MemoryActivityLog::default());
        let b = Arc::new(MemoryActivityLog::default());
        let log = CompositeActivityLog::default().with(a.clone()).with(b.clone());

        log.record(&entry()).await.unwrap();

        assert_eq!(a.entries().len(), 1);
        assert_eq!(b.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_composite_continues_past_failure() {
        let broken = Arc::new(MemoryActivityLog::failing());
        let healthy = Arc::new(MemoryActivityLog::default());
        let log = CompositeActivityLog::new(vec![broken, healthy.clone()]);

        let result = log.record(&entry()).await;

        assert!(matches!(result, Err(RepositoryError::Storage(_))));
        assert_eq!(healthy.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_composite_is_ok() {
        let log = CompositeActivityLog::default();
        assert!(log.record(&entry()).await.is_ok());
    }
}
