//! Runtime configuration for the courier binary.

use std::path::{Path, PathBuf};

use anyhow::Context;
use courier_relay::RelayConfig;
use serde::Deserialize;

const fn default_pacing_ms() -> u64 {
    150
}

const fn default_retention_days() -> u32 {
    30
}

/// Configuration file contents.
///
/// # Examples
///
/// RON config:
/// ```ron
/// (
///     sender: "reports@example.com",
///     store_root: "/var/lib/courier/store",
///     outbound: "/var/lib/courier/outbound",
///     ledger: "/var/lib/courier/ledger",
///     pacing_ms: 150,
///     retention_days: 30,
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CourierConfig {
    /// Verified sender address. Required; an empty value is a fatal startup
    /// condition.
    pub sender: String,

    /// Root directory the message store resolves locators under.
    pub store_root: PathBuf,

    /// Directory accepted outbound messages are written to.
    pub outbound: PathBuf,

    /// Directory the dedup ledger stores records under.
    pub ledger: PathBuf,

    /// Inter-send pacing interval in milliseconds.
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

impl CourierConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if required
    /// values are missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let config: Self = ron::from_str(&contents)
            .with_context(|| format!("Unable to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.sender.trim().is_empty(),
            "sender address is not set"
        );
        Ok(())
    }

    /// The relay-core slice of this configuration.
    #[must_use]
    pub fn relay(&self) -> RelayConfig {
        RelayConfig {
            sender: self.sender.clone(),
            pacing_ms: self.pacing_ms,
            retention_days: self.retention_days,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let config: CourierConfig = ron::from_str(
            r#"(
                sender: "reports@example.com",
                store_root: "/var/lib/courier/store",
                outbound: "/var/lib/courier/outbound",
                ledger: "/var/lib/courier/ledger",
            )"#,
        )
        .unwrap();

        assert_eq!(config.sender, "reports@example.com");
        assert_eq!(config.pacing_ms, 150);
        assert_eq!(config.retention_days, 30);
    }

    #[test]
    fn test_missing_sender_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courier.ron");
        std::fs::write(
            &path,
            r#"(
                sender: "  ",
                store_root: "/s",
                outbound: "/o",
                ledger: "/l",
            )"#,
        )
        .unwrap();

        let err = CourierConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("sender address"));
    }

    #[test]
    fn test_relay_slice_carries_overrides() {
        let config: CourierConfig = ron::from_str(
            r#"(
                sender: "reports@example.com",
                store_root: "/s",
                outbound: "/o",
                ledger: "/l",
                pacing_ms: 10,
                retention_days: 7,
            )"#,
        )
        .unwrap();

        let relay = config.relay();
        assert_eq!(relay.pacing_ms, 10);
        assert_eq!(relay.retention_days, 7);
    }
}
