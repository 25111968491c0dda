//! Webhook verification errors.

use thiserror::Error;

/// Errors from webhook signature verification and event parsing.
///
/// Every variant maps to HTTP 400. Messages are safe to return to the
/// caller: they never include the signing secret or the expected
/// signature value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Missing Stripe-Signature header")]
    MissingHeader,

    #[error("Malformed Stripe-Signature header: {0}")]
    ParseError(String),

    #[error("Signature mismatch")]
    InvalidSignature,

    #[error("Event too old ({age_secs} seconds)")]
    TimestampOutOfRange { age_secs: i64 },

    #[error("Event timestamp in future")]
    TimestampInFuture,

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_do_not_leak_secrets() {
        // Diagnostics go back to the caller verbatim; keep them generic.
        let errors = [
            WebhookError::MissingHeader,
            WebhookError::ParseError("missing timestamp".to_string()),
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange { age_secs: 600 },
            WebhookError::TimestampInFuture,
            WebhookError::InvalidPayload("expected value".to_string()),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(!msg.contains("whsec_"));
            assert!(!msg.to_lowercase().contains("expected signature"));
        }
    }
}
