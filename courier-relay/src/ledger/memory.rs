use async_trait::async_trait;
use courier_common::EventId;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::{
    error::LedgerError,
    ledger::{DedupLedger, DedupRecord},
};

/// In-memory dedup ledger.
///
/// The `DashMap` entry API provides the atomic insert-if-absent; an expired
/// entry is treated as absent, matching the passive retention of the
/// file-backed ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: DashMap<EventId, DedupRecord>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (possibly expired) records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DedupLedger for MemoryLedger {
    async fn is_processed(&self, event_id: &EventId) -> Result<bool, LedgerError> {
        Ok(self
            .records
            .get(event_id)
            .is_some_and(|record| !record.is_expired()))
    }

    async fn record_processed(
        &self,
        event_id: &EventId,
        retention_days: u32,
    ) -> Result<(), LedgerError> {
        match self.records.entry(event_id.clone()) {
            Entry::Occupied(mut occupied) if occupied.get().is_expired() => {
                occupied.insert(DedupRecord::new(retention_days));
                Ok(())
            }
            Entry::Occupied(_) => Err(LedgerError::AlreadyRecorded(event_id.clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(DedupRecord::new(retention_days));
                Ok(())
            }
        }
    }
}
