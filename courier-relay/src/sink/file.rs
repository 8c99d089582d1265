use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

use crate::{
    error::SinkError,
    sink::{DeliverySink, ProviderMessageId},
};

/// Directory-backed delivery sink.
///
/// Each accepted message is written to the outbound directory as
/// `<ulid>.eml`; the ULID doubles as the provider message identifier. A
/// downstream transport agent is expected to drain the directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    outbound: PathBuf,
}

impl FileSink {
    /// Open a sink writing into `outbound`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the directory cannot be created.
    pub async fn open(outbound: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let outbound = outbound.into();
        tokio::fs::create_dir_all(&outbound).await?;
        Ok(Self { outbound })
    }

    /// The directory accepted messages are written to.
    #[must_use]
    pub fn outbound(&self) -> &Path {
        &self.outbound
    }
}

#[async_trait]
impl DeliverySink for FileSink {
    async fn send(&self, message: &str, sender: &str) -> Result<ProviderMessageId, SinkError> {
        let id = ulid::Ulid::new();
        let path = self.outbound.join(format!("{id}.eml"));

        trace!(id = %id, sender, path = %path.display(), "Writing outbound message");
        tokio::fs::write(&path, message.as_bytes()).await?;

        Ok(ProviderMessageId::new(id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_writes_one_file_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::open(dir.path().join("outbound")).await.unwrap();

        let first = sink.send("To: a@x.com\r\n\r\nbody", "sender@x.com").await.unwrap();
        let second = sink.send("To: b@x.com\r\n\r\nbody", "sender@x.com").await.unwrap();
        assert_ne!(first, second);

        let written = std::fs::read_dir(sink.outbound()).unwrap().count();
        assert_eq!(written, 2);

        let contents =
            std::fs::read_to_string(sink.outbound().join(format!("{first}.eml"))).unwrap();
        assert_eq!(contents, "To: a@x.com\r\n\r\nbody");
    }
}
