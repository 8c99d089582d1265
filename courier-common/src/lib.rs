pub mod logging;
pub mod types;

pub use types::{EventId, StorageLocator, TriggerEvent};
