//! Alert channel gateway.

use async_trait::async_trait;
use tracing::info;

use crate::format::Alert;

/// Destination for rendered alerts.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Publish one alert to the channel.
    ///
    /// # Errors
    /// Returns [`crate::NotifyError::Publish`] if the channel rejects it.
    async fn publish(&self, alert: &Alert) -> crate::Result<()>;
}

/// Alert sink that emits into the structured log.
///
/// Suitable for deployments where the log pipeline is the alert channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl LogAlertSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn publish(&self, alert: &Alert) -> crate::Result<()> {
        info!(subject = %alert.subject, "\n{}", alert.body);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_accepts_alerts() {
        let sink = LogAlertSink::new();
        let alert = Alert {
            subject: "[Mail Alert] Bounce: test".to_string(),
            body: "body".to_string(),
        };

        sink.publish(&alert).await.unwrap();
    }
}
