//! Pure text operations on the header block of a raw message.
//!
//! Header names (`From`, `To`, `BCC`) are matched case-sensitively and
//! anchored at start of line; a header whose name merely contains one of
//! these as a substring mid-line is never touched. All functions operate on
//! the decoded text form and leave their input untouched.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

#[allow(
    clippy::unwrap_used,
    reason = "The patterns are statically known to be valid"
)]
static BCC_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^BCC:[ \t]*(.*?)\r?$").unwrap());

#[allow(
    clippy::unwrap_used,
    reason = "The patterns are statically known to be valid"
)]
static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^From:.*\n?").unwrap());

#[allow(
    clippy::unwrap_used,
    reason = "The patterns are statically known to be valid"
)]
static BCC_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^BCC:.*\n?").unwrap());

#[allow(
    clippy::unwrap_used,
    reason = "The patterns are statically known to be valid"
)]
static TO_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^To:[^\r\n]*").unwrap());

/// Extract the blind-copy address list from the first `BCC` line.
///
/// The captured value is split on commas and each token trimmed; insertion
/// order is preserved and determines dispatch order. A message without a
/// `BCC` line (or with an empty value) has zero blind-copy recipients.
#[must_use]
pub fn extract_blind_copies(message: &str) -> Vec<String> {
    let Some(captures) = BCC_VALUE.captures(message) else {
        return Vec::new();
    };

    let value = captures[1].trim();
    if value.is_empty() {
        return Vec::new();
    }

    value.split(',').map(|addr| addr.trim().to_string()).collect()
}

/// Remove the first `From` line and the first `BCC` line, each including its
/// trailing line terminator. Everything else is preserved verbatim.
///
/// Idempotent: applying it twice yields the same result as applying it once.
#[must_use]
pub fn strip_routing_headers(message: &str) -> String {
    let without_from = FROM_LINE.replace(message, "");
    BCC_LINE.replace(&without_from, "").into_owned()
}

/// Replace the first `To` line with `To: <address>`, preserving that line's
/// original terminator and the rest of the message verbatim.
///
/// A message with no `To` line is returned unchanged; that is a deliberate
/// no-op, not an error.
#[must_use]
pub fn rewrite_recipient(message: &str, address: &str) -> String {
    let replacement = format!("To: {address}");
    TO_LINE
        .replace(message, NoExpand(replacement.as_str()))
        .into_owned()
}
