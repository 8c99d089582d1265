//! Idempotent fan-out relay
//!
//! This crate provides the end-to-end relay for one trigger event:
//! - Header transforms for blind-copy extraction and retransmission
//! - A dedup ledger guaranteeing at-most-once processing per event identity
//! - A delivery sink gateway for transmitting one message to one recipient
//! - The orchestrator coordinating fetch, dedup, transform, paced dispatch,
//!   partial-failure tolerance and completion accounting

pub mod error;
pub mod headers;
pub mod ledger;
pub mod relay;
pub mod response;
pub mod sink;

pub use error::{LedgerError, RelayError, Result, SinkError};
pub use ledger::{DedupLedger, DedupRecord, FileLedger, MemoryLedger};
pub use relay::{DeliveryOutcome, FanOutRelay, RelayConfig, RelayOutcome, Summary};
pub use response::Response;
pub use sink::{DeliverySink, FileSink, ProviderMessageId, RecordingSink};
