//! Stripe API client implementing the `PaymentProvider` port.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateSubscriptionRequest, Customer, PaymentError, PaymentIntent, PaymentProvider,
    Subscription,
};

use super::api_types::{
    StripeCheckoutSession, StripeCustomer, StripeErrorEnvelope, StripePaymentIntent,
    StripeSubscription,
};

/// Stripe client configuration.
#[derive(Clone)]
pub struct StripeClientConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for the Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeClientConfig {
    /// Create a new client configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider.
///
/// Explicitly constructed at startup and injected wherever payments are
/// made; there is no global client handle.
pub struct StripeClient {
    config: StripeClientConfig,
    http_client: reqwest::Client,
}

impl StripeClient {
    /// Create a new Stripe client with the given configuration.
    pub fn new(config: StripeClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// POST a form-encoded request and deserialize the JSON response.
    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::parse_response(response, path).await
    }

    /// GET a resource and deserialize the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::parse_response(response, path).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, PaymentError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, path, "Stripe API call failed");
            return Err(map_error_response(status, &body));
        }

        response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

/// Map a non-2xx Stripe response to a `PaymentError`.
///
/// Stripe wraps errors as `{"error": {"message", "type", "code"}}`; the
/// message is surfaced to the caller. 401 means our API key is bad, other
/// 4xx mean the request was rejected, 5xx are provider-side.
fn map_error_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let (message, code) = match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error ({})", status)),
            envelope.error.code,
        ),
        Err(_) => (format!("Stripe API error ({})", status), None),
    };

    let error = if status == reqwest::StatusCode::UNAUTHORIZED {
        PaymentError::authentication(message)
    } else if status.is_client_error() {
        PaymentError::invalid_request(message)
    } else {
        PaymentError::provider(message)
    };

    match code {
        Some(code) => error.with_provider_code(code),
        None => error,
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let params = [
            ("amount", request.amount.to_string()),
            ("currency", request.currency),
            ("payment_method_types[]", "card".to_string()),
        ];

        let intent: StripePaymentIntent = self.post_form("/v1/payment_intents", &params).await?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
            payment_method: intent.payment_method,
        })
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let params = [
            ("email", request.email),
            ("payment_method", request.payment_method_id.clone()),
            (
                "invoice_settings[default_payment_method]",
                request.payment_method_id,
            ),
        ];

        let customer: StripeCustomer = self.post_form("/v1/customers", &params).await?;

        Ok(Customer {
            id: customer.id,
            email: customer.email,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        let params = [
            ("customer", request.customer_id),
            ("items[0][plan]", request.plan_id),
            ("expand[]", "latest_invoice.payment_intent".to_string()),
        ];

        let sub: StripeSubscription = self.post_form("/v1/subscriptions", &params).await?;

        Ok(Subscription {
            id: sub.id,
            customer_id: sub.customer,
            status: sub.status,
            latest_invoice: sub.latest_invoice,
        })
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let params = [
            ("mode", "subscription".to_string()),
            ("customer_email", request.email),
            ("line_items[0][price]", request.plan_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let session: StripeCheckoutSession =
            self.post_form("/v1/checkout/sessions", &params).await?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let intent: StripePaymentIntent = self
            .get(&format!("/v1/payment_intents/{}", payment_intent_id))
            .await?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
            payment_method: intent.payment_method,
        })
    }
}
