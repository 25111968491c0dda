//! Webhook hooks port - injectable event-handling capability.
//!
//! The webhook dispatcher routes verified events to an implementation of
//! this trait. The dispatcher itself carries no business logic; whatever
//! fulfillment or bookkeeping an event should trigger lives behind this
//! seam.

use async_trait::async_trait;

/// Capability invoked for verified webhook events.
///
/// Each method receives the `data.object` payload of the corresponding
/// event. Implementations may suspend (network calls are fine) but must
/// not assume redelivery: a returned error is logged by the dispatcher
/// and swallowed, not retried.
#[async_trait]
pub trait WebhookHooks: Send + Sync {
    /// A checkout session finished successfully.
    async fn on_checkout_completed(&self, payload: &serde_json::Value) -> Result<(), HookError>;

    /// An invoice was paid.
    async fn on_payment_succeeded(&self, payload: &serde_json::Value) -> Result<(), HookError>;

    /// An invoice payment attempt failed.
    async fn on_payment_failed(&self, payload: &serde_json::Value) -> Result<(), HookError>;
}

/// Error returned by a webhook hook.
#[derive(Debug, Clone)]
pub struct HookError {
    /// Human-readable message.
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hook failed: {}", self.message)
    }
}

impl std::error::Error for HookError {}
