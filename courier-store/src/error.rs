//! Error types for the courier-store crate.

use std::io;

use courier_common::StorageLocator;
use thiserror::Error;

/// Top-level store error type.
///
/// Any of these is fatal to a relay in progress: the message bytes are the
/// input to everything else, so there is no degraded mode.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists at the given locator.
    #[error("Object not found: {0}")]
    NotFound(StorageLocator),

    /// The locator is empty, absolute, or contains traversal patterns.
    #[error("Invalid storage locator: {0}")]
    InvalidLocator(StorageLocator),

    /// Transport failure while retrieving the object.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Internal error (lock poisoning, etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        Self::Internal(format!("Lock poisoned: {e}"))
    }
}
