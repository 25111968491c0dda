//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port over Stripe's form-encoded REST
//! API, including:
//! - Payment intents
//! - Customer creation with a default payment method
//! - Subscription creation (latest invoice expanded)
//! - Hosted checkout sessions
//!
//! # Security
//!
//! The API key is sent via HTTP basic auth and held in
//! `secrecy::SecretString`; it never appears in logs or errors.

mod api_types;
mod mock_payment_provider;
mod stripe_client;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_client::{StripeClient, StripeClientConfig};
