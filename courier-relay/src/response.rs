//! HTTP-shaped completion summary returned to the invoker.

use crate::{
    error::RelayError,
    relay::{RelayOutcome, Summary},
};

/// Completion summary: a status code plus a human-readable body.
///
/// Every completed relay (even with partial recipient failures) is a success
/// status; only fatal conditions produce a non-2xx outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// Map a fatal relay error to its outward shape.
    #[must_use]
    pub fn from_error(error: &RelayError) -> Self {
        Self {
            status_code: 500,
            body: error.to_string(),
        }
    }
}

impl From<&RelayOutcome> for Response {
    fn from(outcome: &RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Skipped => Self {
                status_code: 200,
                body: "Event already processed. Skipping.".to_string(),
            },
            RelayOutcome::Completed(Summary { sent, total }) => Self {
                status_code: 200,
                body: format!("Sent {sent} out of {total} email(s) successfully"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_body() {
        let outcome = RelayOutcome::Completed(Summary { sent: 3, total: 4 });
        let response = Response::from(&outcome);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "Sent 3 out of 4 email(s) successfully");
    }

    #[test]
    fn test_skipped_body() {
        let response = Response::from(&RelayOutcome::Skipped);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "Event already processed. Skipping.");
    }

    #[test]
    fn test_fatal_error_is_500() {
        let error = RelayError::Config("sender address must not be empty".to_string());
        let response = Response::from_error(&error);

        assert_eq!(response.status_code, 500);
        assert!(response.body.contains("sender address"));
    }
}
