//! Human-readable alert rendering for provider notifications.

use std::fmt::Write as _;

use tracing::warn;

use crate::model::{Bounce, Complaint, Mail, Notification, NotificationType, Receipt};

/// One rendered alert, ready for the alert channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

/// Render a notification into alert text.
///
/// Returns `None` (with a warning) for notification types that do not map to
/// an alert, or when the payload is missing the details its type promises.
#[must_use]
pub fn format_alert(notification: &Notification) -> Option<Alert> {
    match notification.notification_type {
        NotificationType::Bounce => match &notification.bounce {
            Some(bounce) => Some(format_bounce(bounce, &notification.mail)),
            None => {
                warn!("Bounce notification without bounce details");
                None
            }
        },
        NotificationType::Complaint => match &notification.complaint {
            Some(complaint) => Some(format_complaint(complaint, &notification.mail)),
            None => {
                warn!("Complaint notification without complaint details");
                None
            }
        },
        NotificationType::Received => match &notification.receipt {
            Some(receipt) => Some(format_receipt(receipt, &notification.mail)),
            None => {
                warn!("Received notification without receipt details");
                None
            }
        },
        NotificationType::Delivery | NotificationType::Unknown => {
            warn!("Unsupported notification type");
            None
        }
    }
}

fn subject_of(mail: &Mail) -> &str {
    mail.common_headers
        .as_ref()
        .and_then(|headers| headers.subject.as_deref())
        .unwrap_or("No Subject")
}

fn format_bounce(bounce: &Bounce, mail: &Mail) -> Alert {
    let subject = subject_of(mail);

    let mut recipients = String::new();
    for recipient in &bounce.bounced_recipients {
        let detail = recipient
            .diagnostic_code
            .as_deref()
            .or(recipient.status.as_deref())
            .unwrap_or("unknown");
        let _ = writeln!(recipients, "- {}: {detail}", recipient.email_address);
    }

    let body = format!(
        "\u{26a0}\u{fe0f} Bounce Notification\n\
         \n\
         Original Subject: {subject}\n\
         Bounce Type: {} ({})\n\
         Time: {}\n\
         \n\
         Bounced Recipients:\n\
         {}\n\
         ---\n\
         Message ID: {}\n\
         Feedback ID: {}",
        bounce.bounce_type,
        bounce.bounce_sub_type,
        bounce.timestamp,
        recipients.trim_end(),
        mail.message_id,
        bounce.feedback_id,
    );

    Alert {
        subject: format!("[Mail Alert] Bounce: {subject}"),
        body,
    }
}

fn format_complaint(complaint: &Complaint, mail: &Mail) -> Alert {
    let subject = subject_of(mail);

    let mut recipients = String::new();
    for recipient in &complaint.complained_recipients {
        let _ = writeln!(recipients, "- {}", recipient.email_address);
    }

    let body = format!(
        "\u{1f6a8} Complaint Notification\n\
         \n\
         Original Subject: {subject}\n\
         Time: {}\n\
         Complaint Type: {}\n\
         User Agent: {}\n\
         \n\
         Complained Recipients:\n\
         {}\n\
         ---\n\
         Message ID: {}\n\
         Feedback ID: {}",
        complaint.timestamp,
        complaint
            .complaint_feedback_type
            .as_deref()
            .unwrap_or("Not specified"),
        complaint.user_agent.as_deref().unwrap_or("Not specified"),
        recipients.trim_end(),
        mail.message_id,
        complaint.feedback_id,
    );

    Alert {
        subject: format!("[Mail Alert] Complaint: {subject}"),
        body,
    }
}

fn format_receipt(receipt: &Receipt, mail: &Mail) -> Alert {
    let subject = subject_of(mail);
    let headers = mail.common_headers.clone().unwrap_or_default();
    let from = headers.from.map_or_else(|| "Unknown".to_string(), |f| f.join(", "));
    let to = headers.to.map_or_else(|| "Unknown".to_string(), |t| t.join(", "));

    let body = format!(
        "\u{1f4e7} Email Received (Reply)\n\
         \n\
         Subject: {subject}\n\
         From: {from}\n\
         To: {to}\n\
         Time: {}\n\
         \n\
         Recipients: {}\n\
         \n\
         Spam Verdict: {}\n\
         Virus Verdict: {}\n\
         SPF Verdict: {}\n\
         DKIM Verdict: {}\n\
         DMARC Verdict: {}\n\
         \n\
         ---\n\
         Message ID: {}",
        receipt.timestamp,
        receipt.recipients.join(", "),
        receipt.spam_verdict.status,
        receipt.virus_verdict.status,
        receipt.spf_verdict.status,
        receipt.dkim_verdict.status,
        receipt.dmarc_verdict.status,
        mail.message_id,
    );

    Alert {
        subject: format!("[Mail] Reply: {subject}"),
        body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{BouncedRecipient, CommonHeaders, ComplainedRecipient, Verdict};

    fn mail(subject: Option<&str>) -> Mail {
        Mail {
            message_id: "msg-1".to_string(),
            common_headers: Some(CommonHeaders {
                subject: subject.map(str::to_string),
                from: Some(vec!["sender@example.com".to_string()]),
                to: Some(vec!["primary@example.com".to_string()]),
            }),
        }
    }

    #[test]
    fn test_bounce_alert_lists_recipients_with_diagnostics() {
        let notification = Notification {
            notification_type: NotificationType::Bounce,
            mail: mail(Some("Daily report")),
            bounce: Some(Bounce {
                bounce_type: "Permanent".to_string(),
                bounce_sub_type: "General".to_string(),
                bounced_recipients: vec![
                    BouncedRecipient {
                        email_address: "gone@example.com".to_string(),
                        action: None,
                        status: Some("5.1.1".to_string()),
                        diagnostic_code: Some("smtp; 550 user unknown".to_string()),
                    },
                    BouncedRecipient {
                        email_address: "full@example.com".to_string(),
                        action: None,
                        status: Some("4.2.2".to_string()),
                        diagnostic_code: None,
                    },
                ],
                timestamp: "2025-08-01T12:00:00Z".to_string(),
                feedback_id: "fb-1".to_string(),
            }),
            complaint: None,
            receipt: None,
        };

        let alert = format_alert(&notification).unwrap();
        assert_eq!(alert.subject, "[Mail Alert] Bounce: Daily report");
        assert!(alert.body.contains("Bounce Type: Permanent (General)"));
        assert!(alert.body.contains("- gone@example.com: smtp; 550 user unknown"));
        // Falls back to the status code when no diagnostic is present
        assert!(alert.body.contains("- full@example.com: 4.2.2"));
        assert!(alert.body.contains("Message ID: msg-1"));
        assert!(alert.body.contains("Feedback ID: fb-1"));
    }

    #[test]
    fn test_complaint_alert_defaults_missing_fields() {
        let notification = Notification {
            notification_type: NotificationType::Complaint,
            mail: mail(None),
            bounce: None,
            complaint: Some(Complaint {
                complained_recipients: vec![ComplainedRecipient {
                    email_address: "annoyed@example.com".to_string(),
                }],
                timestamp: "2025-08-01T12:00:00Z".to_string(),
                feedback_id: "fb-2".to_string(),
                user_agent: None,
                complaint_feedback_type: None,
            }),
            receipt: None,
        };

        let alert = format_alert(&notification).unwrap();
        assert_eq!(alert.subject, "[Mail Alert] Complaint: No Subject");
        assert!(alert.body.contains("Complaint Type: Not specified"));
        assert!(alert.body.contains("User Agent: Not specified"));
        assert!(alert.body.contains("- annoyed@example.com"));
    }

    #[test]
    fn test_receipt_alert_includes_verdicts() {
        let verdict = |status: &str| Verdict {
            status: status.to_string(),
        };

        let notification = Notification {
            notification_type: NotificationType::Received,
            mail: mail(Some("Re: Daily report")),
            bounce: None,
            complaint: None,
            receipt: Some(Receipt {
                timestamp: "2025-08-01T12:00:00Z".to_string(),
                recipients: vec!["reports@example.com".to_string()],
                spam_verdict: verdict("PASS"),
                virus_verdict: verdict("PASS"),
                spf_verdict: verdict("PASS"),
                dkim_verdict: verdict("PASS"),
                dmarc_verdict: verdict("FAIL"),
            }),
        };

        let alert = format_alert(&notification).unwrap();
        assert_eq!(alert.subject, "[Mail] Reply: Re: Daily report");
        assert!(alert.body.contains("From: sender@example.com"));
        assert!(alert.body.contains("Spam Verdict: PASS"));
        assert!(alert.body.contains("DMARC Verdict: FAIL"));
    }

    #[test]
    fn test_delivery_notifications_are_skipped() {
        let notification = Notification {
            notification_type: NotificationType::Delivery,
            mail: mail(None),
            bounce: None,
            complaint: None,
            receipt: None,
        };

        assert!(format_alert(&notification).is_none());
    }

    #[test]
    fn test_bounce_without_details_is_skipped() {
        let notification = Notification {
            notification_type: NotificationType::Bounce,
            mail: mail(None),
            bounce: None,
            complaint: None,
            receipt: None,
        };

        assert!(format_alert(&notification).is_none());
    }
}
