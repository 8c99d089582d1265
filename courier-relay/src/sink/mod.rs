//! Delivery sink gateway: transmit one fully formed message to one recipient.

pub mod file;
pub mod recording;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SinkError;

pub use file::FileSink;
pub use recording::{RecordedSend, RecordingSink};

/// Provider-assigned identifier for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderMessageId(String);

impl ProviderMessageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderMessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound transmission primitive.
///
/// One call is one attempt; the relay never retries a failed send. The
/// recipient is whatever the message's own headers say - the sink does not
/// inspect them.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Transmit `message` on behalf of `sender`, returning the provider's
    /// identifier for the accepted message.
    ///
    /// # Errors
    /// Returns a [`SinkError`] on transport failure. The orchestrator treats
    /// this as fatal for the primary recipient and as a logged miss for a
    /// blind-copy recipient.
    async fn send(&self, message: &str, sender: &str) -> Result<ProviderMessageId, SinkError>;
}
