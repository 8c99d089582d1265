use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{
    error::SinkError,
    sink::{DeliverySink, ProviderMessageId},
};

/// One observed send attempt.
#[derive(Debug, Clone)]
pub struct RecordedSend {
    pub message: String,
    pub sender: String,
    /// When the attempt was made; under paused test time this lets tests
    /// assert the pacing interval between consecutive sends.
    pub at: Instant,
}

/// Recording delivery sink for tests.
///
/// Records every attempt (successful or not) and can be programmed to fail
/// specific zero-based attempt indices, which is how tests exercise the
/// partial-failure policy.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sends: Arc<Mutex<Vec<RecordedSend>>>,
    fail_on: Arc<Mutex<HashSet<usize>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the attempts at the given zero-based indices.
    pub fn fail_attempts(&self, indices: impl IntoIterator<Item = usize>) {
        self.fail_on
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend(indices);
    }

    /// All attempts observed so far, in order.
    #[must_use]
    pub fn sends(&self) -> Vec<RecordedSend> {
        self.sends
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of attempts observed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sends
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Check if no attempts were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn send(&self, message: &str, sender: &str) -> Result<ProviderMessageId, SinkError> {
        let index = {
            let mut sends = self
                .sends
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            sends.push(RecordedSend {
                message: message.to_string(),
                sender: sender.to_string(),
                at: Instant::now(),
            });
            sends.len() - 1
        };

        let should_fail = self
            .fail_on
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains(&index);

        if should_fail {
            return Err(SinkError::Transport(format!(
                "Injected failure for attempt {index}"
            )));
        }

        Ok(ProviderMessageId::new(format!("msg-{index}")))
    }
}
