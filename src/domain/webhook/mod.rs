//! Webhook verification and dispatch.
//!
//! This is the correctness-sensitive core of the service:
//! - `verifier` - HMAC-SHA256 signature verification over the raw body
//! - `event` - the verified event envelope and its type tags
//! - `dispatcher` - type-tag routing to injectable hooks
//!
//! # Security
//!
//! - Signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - The signing secret is handled via `secrecy::SecretString`
//!
//! # Invariant
//!
//! A `StripeEvent` is only ever constructed by
//! [`verifier::WebhookVerifier::verify_and_parse`]; no production code
//! path builds one from unverified input.

mod dispatcher;
mod event;
mod errors;
mod verifier;

pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use event::{StripeEvent, StripeEventData, StripeEventType};
pub use errors::WebhookError;
pub use verifier::{SignatureHeader, WebhookVerifier};
