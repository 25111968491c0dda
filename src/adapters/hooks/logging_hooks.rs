//! Logging implementation of the webhook hooks capability.

use async_trait::async_trait;

use crate::ports::{HookError, WebhookHooks};

/// Default `WebhookHooks` implementation: logs each event and succeeds.
///
/// Real fulfillment plugs in behind the same trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHooks;

impl LoggingHooks {
    pub fn new() -> Self {
        Self
    }

    fn object_id(payload: &serde_json::Value) -> &str {
        payload
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>")
    }
}

#[async_trait]
impl WebhookHooks for LoggingHooks {
    async fn on_checkout_completed(&self, payload: &serde_json::Value) -> Result<(), HookError> {
        tracing::info!(session_id = Self::object_id(payload), "Checkout session completed");
        Ok(())
    }

    async fn on_payment_succeeded(&self, payload: &serde_json::Value) -> Result<(), HookError> {
        tracing::info!(invoice_id = Self::object_id(payload), "Invoice payment succeeded");
        Ok(())
    }

    async fn on_payment_failed(&self, payload: &serde_json::Value) -> Result<(), HookError> {
        tracing::warn!(invoice_id = Self::object_id(payload), "Invoice payment failed");
        Ok(())
    }
}
