//! Event dispatch - routes verified events to injected hooks.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::WebhookHooks;

use super::event::{StripeEvent, StripeEventType};

/// Outcome of dispatching a single verified event.
///
/// Every variant results in HTTP 200: once an event has been verified we
/// accept it, so that Stripe does not redeliver events whose hooks
/// merely failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A hook handled the event.
    Dispatched(StripeEventType),

    /// No hook is registered for this event type.
    Unhandled(String),

    /// The hook returned an error or timed out; logged and swallowed.
    HookFailed(StripeEventType),
}

/// Routes verified events to the injected [`WebhookHooks`] capability.
///
/// Exactly one hook fires per recognized event type, and the dispatcher
/// awaits hook completion (bounded by the configured timeout) before
/// returning, so callers only finalize the HTTP response after dispatch
/// is done.
pub struct EventDispatcher {
    hooks: Arc<dyn WebhookHooks>,
    hook_timeout: Duration,
}

impl EventDispatcher {
    pub fn new(hooks: Arc<dyn WebhookHooks>, hook_timeout: Duration) -> Self {
        Self {
            hooks,
            hook_timeout,
        }
    }

    /// Dispatch an event to the hook selected by its type tag.
    ///
    /// Hook errors and timeouts never propagate: they are logged and the
    /// outcome is [`DispatchOutcome::HookFailed`].
    pub async fn dispatch(&self, event: &StripeEvent) -> DispatchOutcome {
        let kind = event.kind();

        let hook_result = match &kind {
            StripeEventType::CheckoutSessionCompleted => {
                self.hooks.on_checkout_completed(&event.data.object)
            }
            StripeEventType::InvoicePaymentSucceeded => {
                self.hooks.on_payment_succeeded(&event.data.object)
            }
            StripeEventType::InvoicePaymentFailed => {
                self.hooks.on_payment_failed(&event.data.object)
            }
            StripeEventType::Unknown(tag) => {
                tracing::info!(event_id = %event.id, event_type = %tag, "Unhandled event type");
                return DispatchOutcome::Unhandled(tag.clone());
            }
        };

        match tokio::time::timeout(self.hook_timeout, hook_result).await {
            Ok(Ok(())) => {
                tracing::info!(event_id = %event.id, event_type = %kind, "Event dispatched");
                DispatchOutcome::Dispatched(kind)
            }
            Ok(Err(e)) => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %kind,
                    error = %e,
                    "Webhook hook failed"
                );
                DispatchOutcome::HookFailed(kind)
            }
            Err(_) => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %kind,
                    timeout_secs = self.hook_timeout.as_secs(),
                    "Webhook hook timed out"
                );
                DispatchOutcome::HookFailed(kind)
            }
        }
    }
}
