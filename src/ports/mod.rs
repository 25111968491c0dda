//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentProvider` - Payment gateway operations (intents, subscriptions, checkout)
//!
//! ## Webhook Ports
//!
//! - `WebhookHooks` - Injectable capability invoked for verified webhook events

mod payment_provider;
mod webhook_hooks;

pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateSubscriptionRequest, Customer, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentProvider, Subscription,
};
pub use webhook_hooks::{HookError, WebhookHooks};
