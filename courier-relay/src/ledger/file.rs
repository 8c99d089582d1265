use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use courier_common::EventId;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{
    error::LedgerError,
    ledger::{DEFAULT_RETENTION_DAYS, DedupLedger, DedupRecord, SECONDS_PER_DAY},
};

const RECORD_EXTENSION: &str = "ron";

/// Directory-backed dedup ledger.
///
/// One file per event identity; `create_new` is the filesystem's atomic
/// insert-if-absent, so two racing invocations cannot both claim an event.
/// Records expire passively and are removed by [`sweep`](Self::sweep).
#[derive(Debug, Clone)]
pub struct FileLedger {
    root: PathBuf,
}

impl FileLedger {
    /// Open a ledger rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns a [`LedgerError`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The directory this ledger stores records under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, event_id: &EventId) -> Result<PathBuf, LedgerError> {
        if !event_id.is_path_safe() {
            return Err(LedgerError::InvalidEventId(event_id.to_string()));
        }

        Ok(self.root.join(format!("{event_id}.{RECORD_EXTENSION}")))
    }

    /// Remove every expired record, returning how many were purged.
    ///
    /// An unreadable record (for example one left behind by a crash between
    /// claiming an event and writing its contents) still blocks its event
    /// identity; it is kept until it is older than the default retention,
    /// then purged like any expired record. Younger unreadable records are
    /// skipped with a warning.
    ///
    /// # Errors
    /// Returns a [`LedgerError`] if the ledger directory cannot be listed.
    pub async fn sweep(&self) -> Result<usize, LedgerError> {
        let mut purged = 0;
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            match Self::read_record(&path).await {
                Ok(record) if record.is_expired() => {
                    tokio::fs::remove_file(&path).await?;
                    purged += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    if Self::is_stale(&path).await {
                        warn!(path = %path.display(), error = %e, "Purging stale unreadable ledger record");
                        tokio::fs::remove_file(&path).await?;
                        purged += 1;
                    } else {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable ledger record");
                    }
                }
            }
        }

        debug!(purged, "Ledger sweep complete");
        Ok(purged)
    }

    async fn read_record(path: &Path) -> Result<DedupRecord, LedgerError> {
        let contents = tokio::fs::read_to_string(path).await?;
        ron::from_str(&contents).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Whether the file is older than the default retention, judged by its
    /// modification time. Unknowable ages count as fresh.
    async fn is_stale(path: &Path) -> bool {
        let max_age = Duration::from_secs(u64::from(DEFAULT_RETENTION_DAYS) * SECONDS_PER_DAY);

        match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified.elapsed().is_ok_and(|age| age >= max_age),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl DedupLedger for FileLedger {
    async fn is_processed(&self, event_id: &EventId) -> Result<bool, LedgerError> {
        let path = self.record_path(event_id)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn record_processed(
        &self,
        event_id: &EventId,
        retention_days: u32,
    ) -> Result<(), LedgerError> {
        let path = self.record_path(event_id)?;
        let record = DedupRecord::new(retention_days);
        let contents = ron::to_string(&record)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(LedgerError::AlreadyRecorded(event_id.clone()));
            }
            Err(e) => return Err(LedgerError::Io(e)),
        };

        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
