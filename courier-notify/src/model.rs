//! Serde models for the provider's structured notification payload.
//!
//! Field names follow the provider's camelCase wire format. Unknown
//! notification types deserialize to [`NotificationType::Unknown`] rather
//! than failing, so new provider types degrade to a warning.

use serde::Deserialize;

/// Discriminator for the notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NotificationType {
    Bounce,
    Complaint,
    Delivery,
    Received,
    #[serde(other)]
    Unknown,
}

/// Top-level notification document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_type: NotificationType,
    pub mail: Mail,
    pub bounce: Option<Bounce>,
    pub complaint: Option<Complaint>,
    pub receipt: Option<Receipt>,
}

impl Notification {
    /// Parse a notification from its JSON wire form.
    ///
    /// # Errors
    /// Returns [`crate::NotifyError::Parse`] for malformed documents.
    pub fn parse(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Details of the original message the notification refers to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mail {
    pub message_id: String,
    #[serde(default)]
    pub common_headers: Option<CommonHeaders>,
}

/// Commonly used headers of the original message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonHeaders {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Option<Vec<String>>,
    #[serde(default)]
    pub to: Option<Vec<String>>,
}

/// One recipient a bounce applies to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BouncedRecipient {
    pub email_address: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub diagnostic_code: Option<String>,
}

/// Bounce details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounce {
    pub bounce_type: String,
    pub bounce_sub_type: String,
    pub bounced_recipients: Vec<BouncedRecipient>,
    pub timestamp: String,
    pub feedback_id: String,
}

/// One recipient who filed a complaint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplainedRecipient {
    pub email_address: String,
}

/// Complaint details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub complained_recipients: Vec<ComplainedRecipient>,
    pub timestamp: String,
    pub feedback_id: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub complaint_feedback_type: Option<String>,
}

/// Verdict status for one receiving-side check.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    pub status: String,
}

/// Receipt details for a received (reply) message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub timestamp: String,
    pub recipients: Vec<String>,
    pub spam_verdict: Verdict,
    pub virus_verdict: Verdict,
    pub spf_verdict: Verdict,
    pub dkim_verdict: Verdict,
    pub dmarc_verdict: Verdict,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounce_payload() {
        let payload = r#"{
            "notificationType": "Bounce",
            "mail": {
                "messageId": "0000014a-f4d4-4f89-b0c4-example",
                "commonHeaders": { "subject": "Daily report" }
            },
            "bounce": {
                "bounceType": "Permanent",
                "bounceSubType": "General",
                "bouncedRecipients": [
                    {
                        "emailAddress": "gone@example.com",
                        "status": "5.1.1",
                        "diagnosticCode": "smtp; 550 5.1.1 user unknown"
                    }
                ],
                "timestamp": "2025-08-01T12:00:00.000Z",
                "feedbackId": "feedback-example"
            }
        }"#;

        let notification = Notification::parse(payload).unwrap();
        assert_eq!(notification.notification_type, NotificationType::Bounce);

        let bounce = notification.bounce.unwrap();
        assert_eq!(bounce.bounce_type, "Permanent");
        assert_eq!(bounce.bounced_recipients.len(), 1);
        assert_eq!(
            bounce.bounced_recipients[0].email_address,
            "gone@example.com"
        );
    }

    #[test]
    fn test_unknown_notification_type_is_tolerated() {
        let payload = r#"{
            "notificationType": "SomethingNew",
            "mail": { "messageId": "id-1" }
        }"#;

        let notification = Notification::parse(payload).unwrap();
        assert_eq!(notification.notification_type, NotificationType::Unknown);
    }

    #[test]
    fn test_malformed_payload_is_a_parse_error() {
        let err = Notification::parse("not json").unwrap_err();
        assert!(matches!(err, crate::NotifyError::Parse(_)));
    }
}
