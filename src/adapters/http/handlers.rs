//! HTTP handlers for payment endpoints.
//!
//! Each create endpoint is a stateless pass-through: validate the input,
//! call the payment provider, map the result. The webhook handler hands
//! the raw bytes to the application layer untouched, since the signature
//! covers the exact bytes on the wire.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{ProcessWebhookCommand, ProcessWebhookHandler};
use crate::ports::{
    CreateCheckoutRequest, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateSubscriptionRequest, PaymentError, PaymentProvider,
};

use super::dto::{
    CheckoutSessionResponse, CreateCheckoutSessionBody, CreatePaymentIntentBody,
    CreateSubscriptionBody, ErrorResponse, PaymentIntentResponse, PaymentMethodResponse,
    RetrievePaymentMethodBody, SubscriptionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Payment API error that implements IntoResponse.
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<PaymentError> for ApiError {
    fn from(error: PaymentError) -> Self {
        if error.is_client_fault() {
            ApiError::BadRequest(error.message)
        } else {
            ApiError::Internal(error.message)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
///
/// Everything here is read-only after startup; requests share nothing
/// mutable.
#[derive(Clone)]
pub struct AppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub webhook_handler: Arc<ProcessWebhookHandler>,
    pub default_currency: String,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentIntentBody>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    if body.amount <= 0 {
        return Err(ApiError::BadRequest("amount must be positive".to_string()));
    }

    let currency = body
        .currency
        .unwrap_or_else(|| state.default_currency.clone());

    let intent = state
        .payment_provider
        .create_payment_intent(CreatePaymentIntentRequest {
            amount: body.amount,
            currency,
        })
        .await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
        id: intent.id,
    }))
}

/// `POST /create-subscription`
///
/// Creates the customer first, then subscribes it to the requested plan.
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(body): Json<CreateSubscriptionBody>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    require_non_empty("email", &body.email)?;
    require_non_empty("paymentMethodId", &body.payment_method_id)?;
    require_non_empty("planId", &body.plan_id)?;

    let customer = state
        .payment_provider
        .create_customer(CreateCustomerRequest {
            email: body.email,
            payment_method_id: body.payment_method_id,
        })
        .await?;

    let subscription = state
        .payment_provider
        .create_subscription(CreateSubscriptionRequest {
            customer_id: customer.id,
            plan_id: body.plan_id,
        })
        .await?;

    Ok(Json(SubscriptionResponse {
        id: subscription.id,
        customer_id: subscription.customer_id,
        status: subscription.status,
        latest_invoice: subscription.latest_invoice,
    }))
}

/// `POST /create-checkout-session`
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(body): Json<CreateCheckoutSessionBody>,
) -> Result<Json<CheckoutSessionResponse>, ApiError> {
    require_non_empty("email", &body.email)?;
    require_non_empty("planId", &body.plan_id)?;

    let session = state
        .payment_provider
        .create_checkout_session(CreateCheckoutRequest {
            email: body.email,
            plan_id: body.plan_id,
            success_url: state.checkout_success_url.clone(),
            cancel_url: state.checkout_cancel_url.clone(),
        })
        .await?;

    Ok(Json(CheckoutSessionResponse { id: session.id }))
}

/// `POST /retrieve-payment-method-id`
pub async fn retrieve_payment_method_id(
    State(state): State<AppState>,
    Json(body): Json<RetrievePaymentMethodBody>,
) -> Result<Json<PaymentMethodResponse>, ApiError> {
    require_non_empty("paymentIntentId", &body.payment_intent_id)?;

    let intent = state
        .payment_provider
        .retrieve_payment_intent(&body.payment_intent_id)
        .await?;

    Ok(Json(PaymentMethodResponse {
        payment_method_id: intent.payment_method,
    }))
}

/// `POST /webhook`
///
/// Takes the body as raw bytes; any verification failure is a 400 with a
/// short text diagnostic, and every verified event is a 200 with an
/// empty body once dispatch completes.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
    else {
        return (
            StatusCode::BAD_REQUEST,
            "Webhook Error: Missing Stripe-Signature header".to_string(),
        )
            .into_response();
    };

    let command = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    match state.webhook_handler.handle(command).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, format!("Webhook Error: {}", e)).into_response(),
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}
