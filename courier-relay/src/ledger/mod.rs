//! Dedup ledger: at-most-once processing per event identity.
//!
//! The ledger records that a send attempt was made for an event, not its
//! outcome. A record, once written, is immutable and is the sole source of
//! truth for "has this event already triggered a send attempt". A prior
//! partial failure is still marked processed and will not be retried
//! automatically.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courier_common::EventId;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub use file::FileLedger;
pub use memory::MemoryLedger;

/// Default retention before a record may be purged.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

const SECONDS_PER_DAY: u64 = 86_400;

/// One immutable ledger entry, created exactly once per event identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupRecord {
    /// When the event was marked processed.
    pub processed_at: DateTime<Utc>,
    /// Epoch seconds after which the record may be purged by the ledger's
    /// own retention policy.
    pub expiration_time: u64,
}

impl DedupRecord {
    /// Create a record expiring `retention_days` from now.
    #[must_use]
    pub fn new(retention_days: u32) -> Self {
        let now = Utc::now();
        let expiration_time =
            u64::try_from(now.timestamp()).unwrap_or_default() + u64::from(retention_days) * SECONDS_PER_DAY;

        Self {
            processed_at: now,
            expiration_time,
        }
    }

    /// Whether the retention window has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        u64::try_from(Utc::now().timestamp()).unwrap_or_default() >= self.expiration_time
    }
}

/// Contract for idempotency tracking across orchestrator invocations,
/// including concurrent invocations caused by at-least-once trigger delivery.
///
/// The atomic conditional insert in [`record_processed`](Self::record_processed)
/// is the sole concurrency-safety mechanism preventing double-sending when two
/// invocations race on the same event identity.
#[async_trait]
pub trait DedupLedger: Send + Sync {
    /// Point lookup: the existence of a record (regardless of its contents)
    /// means the event was already handled. Retention is each backend's own
    /// policy; expired records disappear passively.
    ///
    /// # Errors
    /// Returns a [`LedgerError`] on storage failure.
    async fn is_processed(&self, event_id: &EventId) -> Result<bool, LedgerError>;

    /// Atomically insert a record for `event_id`, failing with
    /// [`LedgerError::AlreadyRecorded`] if the key already exists.
    ///
    /// # Errors
    /// `AlreadyRecorded` if the event was already handled; any other variant
    /// is a transient infrastructure failure.
    async fn record_processed(
        &self,
        event_id: &EventId,
        retention_days: u32,
    ) -> Result<(), LedgerError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_expiration_window() {
        let record = DedupRecord::new(30);
        let now = u64::try_from(Utc::now().timestamp()).unwrap();

        assert!(!record.is_expired());
        // 30 days out, allowing a little slack for test runtime
        let expected = now + 30 * SECONDS_PER_DAY;
        assert!(record.expiration_time >= expected - 5);
        assert!(record.expiration_time <= expected + 5);
    }

    #[test]
    fn test_zero_retention_expires_immediately() {
        let record = DedupRecord::new(0);
        assert!(record.is_expired());
    }
}
