//! Delivery-failure notification relay
//!
//! Parses structured provider notifications (bounces, complaints, reply
//! receipts) and formats them into human-readable alert text for an alert
//! channel.

pub mod error;
pub mod format;
pub mod model;
pub mod sink;

pub use error::{NotifyError, Result};
pub use format::{Alert, format_alert};
pub use model::{Bounce, Complaint, Notification, NotificationType, Receipt};
pub use sink::{AlertSink, LogAlertSink};
