//! Core identifiers shared across the relay.

use serde::{Deserialize, Serialize};

/// Stable, unique token identifying one triggering occurrence.
///
/// This is distinct from the storage key: a key may be reused across uploads,
/// the event identity must not be. Upstream typically supplies a content hash
/// or etag here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identity can safely be used as a single filename component.
    ///
    /// # Security
    /// Rejects empty identities, path separators (/ and \\) and directory
    /// traversal patterns (..) so file-backed stores cannot be escaped.
    #[must_use]
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && !self.0.contains('/')
            && !self.0.contains('\\')
            && !self.0.contains("..")
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Location of a stored raw message: a container (bucket equivalent) plus an
/// object key within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocator {
    pub container: String,
    pub key: String,
}

impl StorageLocator {
    #[must_use]
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }

    /// Whether this locator can safely be resolved under a root directory.
    ///
    /// The key may contain `/` (nested object keys are common), but neither
    /// component may be empty, absolute, or contain traversal patterns.
    #[must_use]
    pub fn is_path_safe(&self) -> bool {
        let component_safe = |component: &str| {
            !component.is_empty()
                && !component.starts_with('/')
                && !component.contains('\\')
                && !component.contains("..")
        };

        component_safe(&self.container) && !self.container.contains('/') && component_safe(&self.key)
    }
}

impl std::fmt::Display for StorageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

/// One storage object that newly appeared, as reported by the upstream
/// trigger source. Consumed once per relay invocation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Where the raw message bytes live.
    pub locator: StorageLocator,
    /// Identity used for deduplication, NOT the storage key.
    pub event_id: EventId,
}

impl TriggerEvent {
    #[must_use]
    pub fn new(locator: StorageLocator, event_id: EventId) -> Self {
        Self { locator, event_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_path_safety() {
        assert!(EventId::from("2a0416ba70673064f9c86b5c413129c7").is_path_safe());

        assert!(!EventId::from("").is_path_safe());
        assert!(!EventId::from("../etc/passwd").is_path_safe());
        assert!(!EventId::from("foo/bar").is_path_safe());
        assert!(!EventId::from("..\\windows\\system32").is_path_safe());
    }

    #[test]
    fn test_locator_path_safety() {
        assert!(StorageLocator::new("reports", "daily.eml").is_path_safe());
        assert!(StorageLocator::new("reports", "2025/08/daily.eml").is_path_safe());

        assert!(!StorageLocator::new("", "daily.eml").is_path_safe());
        assert!(!StorageLocator::new("reports", "").is_path_safe());
        assert!(!StorageLocator::new("reports", "../secrets.eml").is_path_safe());
        assert!(!StorageLocator::new("reports", "/etc/passwd").is_path_safe());
        assert!(!StorageLocator::new("a/b", "daily.eml").is_path_safe());
    }

    #[test]
    fn test_locator_display() {
        let locator = StorageLocator::new("reports", "daily.eml");
        assert_eq!(locator.to_string(), "reports/daily.eml");
    }
}
