//! Payrelay server entrypoint.
//!
//! Loads configuration, wires the Stripe client and webhook pipeline,
//! and serves the payment API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use payrelay::adapters::hooks::LoggingHooks;
use payrelay::adapters::http::{payment_routes, AppState};
use payrelay::adapters::stripe::{StripeClient, StripeClientConfig};
use payrelay::application::handlers::ProcessWebhookHandler;
use payrelay::config::AppConfig;
use payrelay::domain::webhook::{EventDispatcher, WebhookVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    if config.payment.is_test_mode() {
        tracing::info!("Stripe test mode key configured");
    }

    // Dependencies are constructed once here and shared read-only;
    // their lifecycle is the process lifecycle.
    let payment_provider = Arc::new(StripeClient::new(StripeClientConfig::new(
        config.payment.stripe_api_key.clone(),
    )));

    let verifier = WebhookVerifier::new(config.payment.active_webhook_secret());
    let dispatcher = EventDispatcher::new(
        Arc::new(LoggingHooks::new()),
        Duration::from_secs(config.payment.hook_timeout_secs),
    );
    let webhook_handler = Arc::new(ProcessWebhookHandler::new(verifier, dispatcher));

    let state = AppState {
        payment_provider,
        webhook_handler,
        default_currency: config.payment.currency.clone(),
        checkout_success_url: config.payment.checkout_success_url.clone(),
        checkout_cancel_url: config.payment.checkout_cancel_url.clone(),
    };

    let cors = build_cors_layer(&config.server.cors_origins_list())?;

    let app = payment_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = config.server.environment.as_str(), "Server is running");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer: permissive when no origins are configured,
/// restricted to the configured list otherwise.
fn build_cors_layer(origins: &[String]) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
