//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! Implementations handle actual payment processing: one-off payment
//! intents, customer and subscription creation, and hosted checkout.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Stateless**: Every operation is a single request/response call
//! - **Error transparent**: Provider error messages are surfaced to callers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider integrations.
///
/// Each method maps to exactly one provider API call; nothing is retried
/// here and no state is kept between calls.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for a one-off card payment.
    ///
    /// Returns the intent including the client secret used by the
    /// frontend to confirm the payment.
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Create a customer with a default payment method attached.
    async fn create_customer(&self, request: CreateCustomerRequest)
        -> Result<Customer, PaymentError>;

    /// Create a subscription for an existing customer.
    ///
    /// The latest invoice (with its payment intent expanded) is included
    /// so the caller can drive client-side payment confirmation.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError>;

    /// Create a hosted checkout session for a subscription purchase.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Retrieve a payment intent by its provider ID.
    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Request to create a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in the smallest currency unit (e.g., paise).
    pub amount: i64,

    /// Three-letter currency code (lowercase).
    pub currency: String,
}

/// Payment intent in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's payment intent ID (pi_...).
    pub id: String,

    /// Client secret for frontend confirmation.
    pub client_secret: Option<String>,

    /// Intent status (e.g., "requires_payment_method", "succeeded").
    pub status: String,

    /// Attached payment method ID, if any.
    pub payment_method: Option<String>,
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer email address.
    pub email: String,

    /// Payment method to attach as the invoice default.
    pub payment_method_id: String,
}

/// Customer in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID (cus_...).
    pub id: String,

    /// Customer email.
    pub email: Option<String>,
}

/// Request to create a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Provider's customer ID.
    pub customer_id: String,

    /// Provider's plan/price ID to subscribe to.
    pub plan_id: String,
}

/// Subscription in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider's subscription ID (sub_...).
    pub id: String,

    /// Provider's customer ID.
    pub customer_id: String,

    /// Subscription status (e.g., "active", "incomplete").
    pub status: String,

    /// Latest invoice with its payment intent expanded.
    pub latest_invoice: Option<serde_json::Value>,
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Customer email for pre-fill.
    pub email: String,

    /// Provider's plan/price ID to subscribe to.
    pub plan_id: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID (cs_...).
    pub id: String,

    /// URL for the customer to complete checkout.
    pub url: Option<String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Attach the provider's own error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create an invalid-request error (caller's input was rejected).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a provider-side error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Whether the caller's request was at fault (maps to HTTP 400).
    pub fn is_client_fault(&self) -> bool {
        self.code == PaymentErrorCode::InvalidRequest
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// The request sent to the provider was rejected as invalid.
    InvalidRequest,

    /// API authentication failed.
    AuthenticationError,

    /// Network connectivity issue.
    NetworkError,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
