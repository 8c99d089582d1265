//! Message store gateway
//!
//! Fetches raw message bytes for a given storage locator. Two backends are
//! provided:
//! - `memory`: in-memory storage for testing and transient messages
//! - `file`: directory-backed storage for production use

pub mod backends;
pub mod error;
pub mod r#trait;

pub use backends::{FileBlobStore, MemoryBlobStore};
pub use error::{Result, StoreError};
pub use r#trait::BlobStore;
