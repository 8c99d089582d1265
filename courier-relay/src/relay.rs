//! Fan-out orchestrator: the end-to-end relay for one trigger event.

use std::{sync::Arc, time::Duration};

use courier_common::TriggerEvent;
use courier_store::BlobStore;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{LedgerError, RelayError, SinkError},
    headers,
    ledger::{DEFAULT_RETENTION_DAYS, DedupLedger},
    sink::{DeliverySink, ProviderMessageId},
};

const fn default_pacing_ms() -> u64 {
    150
}

const fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

/// Configuration for the fan-out relay.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Verified sender address every outbound message is sent on behalf of.
    pub sender: String,

    /// Inter-send pacing interval in milliseconds.
    ///
    /// Applied before every blind-copy send (including the first), never
    /// before the primary send. Throttles outbound rate to respect the
    /// downstream provider's limits.
    ///
    /// Default: 150
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Days before a dedup record may be purged.
    ///
    /// Default: 30
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl RelayConfig {
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            pacing_ms: default_pacing_ms(),
            retention_days: default_retention_days(),
        }
    }

    /// The pacing interval as a [`Duration`].
    #[must_use]
    pub const fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Completion accounting for one relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Messages the provider accepted.
    pub sent: usize,
    /// Messages attempted: one primary plus one per blind-copy recipient.
    pub total: usize,
}

/// Result of one relay invocation. Both variants are success outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The event identity was already recorded; zero sends were attempted.
    Skipped,
    /// Dispatch ran to completion (possibly with blind-copy misses).
    Completed(Summary),
}

/// Per-recipient result for one blind-copy dispatch.
///
/// Ephemeral: exists for the duration of one dispatch loop and is folded into
/// the aggregate count. Failures live here as values precisely so the
/// partial-failure policy stays visible and testable per recipient.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Sent(ProviderMessageId),
    Failed(SinkError),
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Coordinates retrieval, dedup check, header transform, sequential
/// multi-recipient dispatch with inter-send pacing, partial-failure
/// tolerance, and completion accounting.
pub struct FanOutRelay {
    config: RelayConfig,
    store: Arc<dyn BlobStore>,
    sink: Arc<dyn DeliverySink>,
    ledger: Arc<dyn DedupLedger>,
}

impl std::fmt::Debug for FanOutRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutRelay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FanOutRelay {
    /// Create a relay over the given gateways.
    ///
    /// # Errors
    /// Returns [`RelayError::Config`] if the sender address is empty; missing
    /// required configuration aborts before any work.
    pub fn new(
        config: RelayConfig,
        store: Arc<dyn BlobStore>,
        sink: Arc<dyn DeliverySink>,
        ledger: Arc<dyn DedupLedger>,
    ) -> crate::Result<Self> {
        if config.sender.trim().is_empty() {
            return Err(RelayError::Config(
                "sender address must not be empty".to_string(),
            ));
        }

        Ok(Self {
            config,
            store,
            sink,
            ledger,
        })
    }

    /// Relay one trigger event: at most once per event identity, one primary
    /// send plus a paced send per blind-copy recipient, partial blind-copy
    /// failures tolerated.
    ///
    /// # Errors
    /// Fatal kinds only (fetch failure, primary send failure, ledger
    /// infrastructure failure); none of them leaves the event marked
    /// processed unless dispatch already completed.
    pub async fn relay(&self, event: &TriggerEvent) -> crate::Result<RelayOutcome> {
        if self.ledger.is_processed(&event.event_id).await? {
            info!(event_id = %event.event_id, "Event already processed, skipping");
            return Ok(RelayOutcome::Skipped);
        }

        info!(locator = %event.locator, event_id = %event.event_id, "New message detected");

        let bytes = self.store.fetch(&event.locator).await?;
        let message = String::from_utf8_lossy(&bytes).into_owned();

        let recipients = headers::extract_blind_copies(&message);
        let cleaned = headers::strip_routing_headers(&message);

        // The primary recipient is mandatory: no best-effort policy here.
        let primary_id = self
            .sink
            .send(&cleaned, &self.config.sender)
            .await
            .map_err(RelayError::PrimarySend)?;
        info!(message_id = %primary_id, "Primary message accepted");

        let outcomes = self.dispatch_blind_copies(&cleaned, &recipients).await;
        let sent = 1 + outcomes.iter().filter(|o| o.is_sent()).count();
        let total = 1 + recipients.len();

        match self
            .ledger
            .record_processed(&event.event_id, self.config.retention_days)
            .await
        {
            Ok(()) => {}
            Err(LedgerError::AlreadyRecorded(_)) => {
                // Lost a race against a concurrent invocation after dispatch;
                // nothing to unsend, so confirm and carry on.
                warn!(event_id = %event.event_id, "Event was recorded by a concurrent invocation");
            }
            Err(e) => return Err(e.into()),
        }

        info!(sent, total, event_id = %event.event_id, "Relay complete");
        Ok(RelayOutcome::Completed(Summary { sent, total }))
    }

    /// Sequential blind-copy dispatch, in header order, with the pacing
    /// interval before every send. An explicit result-collection pass: each
    /// failure is logged and kept as a value, never rethrown.
    async fn dispatch_blind_copies(
        &self,
        cleaned: &str,
        recipients: &[String],
    ) -> Vec<DeliveryOutcome> {
        let mut outcomes = Vec::with_capacity(recipients.len());

        for address in recipients {
            tokio::time::sleep(self.config.pacing()).await;

            let personalised = headers::rewrite_recipient(cleaned, address);
            match self.sink.send(&personalised, &self.config.sender).await {
                Ok(id) => {
                    info!(message_id = %id, recipient = %address, "Blind-copy message accepted");
                    outcomes.push(DeliveryOutcome::Sent(id));
                }
                Err(e) => {
                    warn!(recipient = %address, error = %e, "Blind-copy send failed, continuing");
                    outcomes.push(DeliveryOutcome::Failed(e));
                }
            }
        }

        outcomes
    }
}
