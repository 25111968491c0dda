//! Stripe API response types.
//!
//! Only the fields this service reads are modeled; everything else in
//! Stripe's responses is ignored during deserialization.

use serde::Deserialize;

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Unique intent identifier (pi_...).
    pub id: String,

    /// Client secret for frontend confirmation.
    pub client_secret: Option<String>,

    /// Intent status.
    pub status: String,

    /// Attached payment method ID.
    pub payment_method: Option<String>,
}

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Customer email address.
    pub email: Option<String>,
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer ID owning this subscription.
    pub customer: String,

    /// Subscription status.
    pub status: String,

    /// Latest invoice; an object when expanded, otherwise an ID string.
    pub latest_invoice: Option<serde_json::Value>,
}

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted checkout URL.
    pub url: Option<String>,
}

/// Stripe error response envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Error details inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Human-readable message.
    pub message: Option<String>,

    /// Error category (e.g., "invalid_request_error", "card_error").
    #[serde(rename = "type")]
    pub error_type: Option<String>,

    /// Machine-readable code (e.g., "resource_missing").
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_payment_intent() {
        let json = r#"{
            "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
            "object": "payment_intent",
            "amount": 500,
            "client_secret": "pi_3MtwBw_secret_YrKJUKribcBjcG8HVhfZluoGH",
            "currency": "inr",
            "status": "requires_payment_method",
            "payment_method": null
        }"#;

        let intent: StripePaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.id, "pi_3MtwBwLkdIwHu7ix28a3tqPa");
        assert!(intent.client_secret.unwrap().starts_with("pi_3MtwBw_secret"));
        assert_eq!(intent.status, "requires_payment_method");
        assert!(intent.payment_method.is_none());
    }

    #[test]
    fn parse_subscription_with_expanded_invoice() {
        let json = r#"{
            "id": "sub_1Mo3mdLkdIwHu7ix0byERyyf",
            "object": "subscription",
            "customer": "cus_NZKoKPLgJD8kVE",
            "status": "incomplete",
            "latest_invoice": {
                "id": "in_1Mo3mdLkdIwHu7ixNia8YTXT",
                "payment_intent": {
                    "id": "pi_1Mo3meLkdIwHu7ix",
                    "client_secret": "pi_1Mo3me_secret_xyz"
                }
            }
        }"#;

        let sub: StripeSubscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.customer, "cus_NZKoKPLgJD8kVE");
        assert_eq!(sub.status, "incomplete");
        let invoice = sub.latest_invoice.unwrap();
        assert!(invoice.get("payment_intent").is_some());
    }

    #[test]
    fn parse_subscription_with_invoice_id_only() {
        // Without expand, latest_invoice is just the ID string
        let json = r#"{
            "id": "sub_minimal",
            "customer": "cus_123",
            "status": "active",
            "latest_invoice": "in_1Mo3mdLkdIwHu7ixNia8YTXT"
        }"#;

        let sub: StripeSubscription = serde_json::from_str(json).unwrap();
        assert!(sub.latest_invoice.unwrap().is_string());
    }

    #[test]
    fn parse_checkout_session() {
        let json = r#"{
            "id": "cs_test_a1b2c3",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_a1b2c3"
        }"#;

        let session: StripeCheckoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "cs_test_a1b2c3");
        assert!(session.url.unwrap().contains("checkout.stripe.com"));
    }

    #[test]
    fn parse_error_envelope() {
        let json = r#"{
            "error": {
                "message": "No such plan: 'price_missing'",
                "type": "invalid_request_error",
                "code": "resource_missing",
                "param": "plan"
            }
        }"#;

        let envelope: StripeErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("No such plan: 'price_missing'")
        );
        assert_eq!(
            envelope.error.error_type.as_deref(),
            Some("invalid_request_error")
        );
        assert_eq!(envelope.error.code.as_deref(), Some("resource_missing"));
    }
}
