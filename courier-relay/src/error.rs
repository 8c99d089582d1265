//! Typed error handling for relay operations.
//!
//! The taxonomy distinguishes:
//! - Fatal kinds (`RelayError`) - abort the relay, event is NOT marked processed
//! - Recoverable blind-copy failures - never errors, folded into the final count
//! - `LedgerError::AlreadyRecorded` - a catchable dedup-race confirmation

use std::io;

use courier_common::EventId;
use courier_store::StoreError;
use thiserror::Error;

/// Fatal relay error. Any of these bubbles to the caller and leaves the event
/// unrecorded, so the trigger mechanism's own retry can reattempt the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or invalid required configuration - aborts before any work.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Message retrieval failure - aborts before any send.
    #[error("Message fetch failed: {0}")]
    Fetch(#[from] StoreError),

    /// Primary recipient send failure - the primary recipient is mandatory,
    /// there is no best-effort policy for it.
    #[error("Primary delivery failed: {0}")]
    PrimarySend(#[source] SinkError),

    /// Ledger failure other than the benign already-recorded case.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Failure transmitting one message to one recipient.
///
/// For the primary recipient this is wrapped into [`RelayError::PrimarySend`]
/// and treated as fatal; for a blind-copy recipient it is logged, counted as a
/// miss, and never escalated.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Transport failure talking to the delivery provider.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O failure in a file-backed sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Dedup ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The atomic conditional insert found an existing record. Callers that
    /// record after completing dispatch must never treat this as fatal; it
    /// only confirms another attempt already owns the event.
    #[error("Event already recorded: {0}")]
    AlreadyRecorded(EventId),

    /// The event identity cannot be used as a ledger key.
    #[error("Invalid event identity: {0}")]
    InvalidEventId(String),

    /// Transient storage failure - distinct from `AlreadyRecorded`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LedgerError {
    /// Returns `true` for the benign race-loss case.
    #[must_use]
    pub const fn is_already_recorded(&self) -> bool {
        matches!(self, Self::AlreadyRecorded(_))
    }
}

/// Specialized `Result` type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
