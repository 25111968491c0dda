//! HTTP DTOs for payment endpoints.
//!
//! Wire field names are camelCase, matching the frontend contract.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /create-payment-intent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentBody {
    /// Amount in the smallest currency unit.
    pub amount: i64,

    /// Optional currency override; the configured default applies
    /// when absent.
    pub currency: Option<String>,
}

/// Request body for `POST /create-subscription`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionBody {
    pub email: String,
    pub payment_method_id: String,
    pub plan_id: String,
}

/// Request body for `POST /create-checkout-session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionBody {
    pub email: String,
    pub plan_id: String,
}

/// Request body for `POST /retrieve-payment-method-id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievePaymentMethodBody {
    pub payment_intent_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `POST /create-payment-intent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: Option<String>,
    pub id: String,
}

/// Response for `POST /create-subscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    pub customer_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_invoice: Option<serde_json::Value>,
}

/// Response for `POST /create-checkout-session`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
}

/// Response for `POST /retrieve-payment-method-id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResponse {
    pub payment_method_id: Option<String>,
}

/// Standard error response: `{"error": message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payment_intent_body_accepts_camel_case() {
        let body: CreatePaymentIntentBody =
            serde_json::from_value(json!({"amount": 500})).unwrap();
        assert_eq!(body.amount, 500);
        assert!(body.currency.is_none());

        let body: CreatePaymentIntentBody =
            serde_json::from_value(json!({"amount": 500, "currency": "usd"})).unwrap();
        assert_eq!(body.currency.as_deref(), Some("usd"));
    }

    #[test]
    fn subscription_body_requires_all_fields() {
        let result: Result<CreateSubscriptionBody, _> =
            serde_json::from_value(json!({"email": "a@b.test"}));
        assert!(result.is_err());

        let body: CreateSubscriptionBody = serde_json::from_value(json!({
            "email": "a@b.test",
            "paymentMethodId": "pm_123",
            "planId": "plan_basic"
        }))
        .unwrap();
        assert_eq!(body.payment_method_id, "pm_123");
        assert_eq!(body.plan_id, "plan_basic");
    }

    #[test]
    fn payment_intent_response_uses_camel_case() {
        let response = PaymentIntentResponse {
            client_secret: Some("cs_test".to_string()),
            id: "pi_test".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"clientSecret": "cs_test", "id": "pi_test"}));
    }

    #[test]
    fn payment_method_response_serializes_null_when_absent() {
        let response = PaymentMethodResponse {
            payment_method_id: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"paymentMethodId": null}));
    }

    #[test]
    fn error_response_shape() {
        let response = ErrorResponse::new("No such plan");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"error": "No such plan"}));
    }
}
