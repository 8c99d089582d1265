use thiserror::Error;

/// Notification processing errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The payload is not a well-formed notification document.
    #[error("Invalid notification payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The alert channel rejected the publish.
    #[error("Alert publish failed: {0}")]
    Publish(String),
}

/// Specialized `Result` type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
