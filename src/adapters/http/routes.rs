//! Axum router configuration for payment endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{
    create_checkout_session, create_payment_intent, create_subscription, handle_webhook,
    retrieve_payment_method_id, AppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// - `POST /create-payment-intent` - One-off card payment intent
/// - `POST /create-subscription` - Customer + subscription creation
/// - `POST /create-checkout-session` - Hosted checkout session
/// - `POST /retrieve-payment-method-id` - Payment method lookup
/// - `POST /webhook` - Stripe webhook receiver (signature verified)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/create-subscription", post(create_subscription))
        .route("/create-checkout-session", post(create_checkout_session))
        .route(
            "/retrieve-payment-method-id",
            post(retrieve_payment_method_id),
        )
        .route("/webhook", post(handle_webhook))
}
