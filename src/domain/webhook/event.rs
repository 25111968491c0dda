//! Verified webhook event envelope.
//!
//! These types represent Stripe events as they arrive in webhook payloads.
//! An event value lives for one request: constructed by the verifier,
//! consumed synchronously by the dispatcher, then discarded.

use serde::{Deserialize, Serialize};

/// Stripe webhook event envelope.
///
/// The payload (`data.object`) is kept opaque; its shape depends on the
/// event type and only the hooks interpret it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type tag (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    pub livemode: bool,

    /// Stripe API version used for this event.
    pub api_version: Option<String>,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,

    /// Previous values for updated fields (on update events).
    pub previous_attributes: Option<serde_json::Value>,
}

impl StripeEvent {
    /// Classify the event's string tag into a routing decision.
    pub fn kind(&self) -> StripeEventType {
        StripeEventType::from_tag(&self.event_type)
    }
}

/// Event types the dispatcher routes.
///
/// Everything outside the three handled tags collapses into `Unknown`,
/// which dispatches to no hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripeEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,

    /// Invoice paid successfully.
    InvoicePaymentSucceeded,

    /// Invoice payment failed.
    InvoicePaymentFailed,

    /// Unrecognized event type (carries the original tag for logging).
    Unknown(String),
}

impl StripeEventType {
    /// Map a Stripe event-type string to a routing decision.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "invoice.payment_succeeded" => Self::InvoicePaymentSucceeded,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for StripeEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckoutSessionCompleted => write!(f, "checkout.session.completed"),
            Self::InvoicePaymentSucceeded => write!(f, "invoice.payment_succeeded"),
            Self::InvoicePaymentFailed => write!(f, "invoice.payment_failed"),
            Self::Unknown(tag) => write!(f, "{}", tag),
        }
    }
}
