//! ProcessWebhookHandler - Command handler for inbound payment webhooks.
//!
//! A request moves through exactly two states: unverified bytes in,
//! verified event out (or a `WebhookError`). There are no retries here;
//! redelivery is the payment provider's responsibility.

use crate::domain::webhook::{DispatchOutcome, EventDispatcher, WebhookError, WebhookVerifier};

/// Command to process an inbound webhook request.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw webhook payload, exactly as received on the wire.
    pub payload: Vec<u8>,

    /// Value of the Stripe-Signature header.
    pub signature: String,
}

/// Result of webhook processing.
///
/// All variants are acknowledged with HTTP 200; only a [`WebhookError`]
/// produces a 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessWebhookResult {
    /// Event verified and a hook handled it.
    Dispatched { event_id: String },

    /// Event verified but its type has no registered hook.
    Unhandled { event_id: String, event_type: String },

    /// Event verified but the hook failed; error was logged.
    HookFailed { event_id: String },
}

/// Handler for processing payment provider webhooks.
///
/// Verification happens before anything else; no event value exists
/// until the signature over the raw bytes has been checked.
pub struct ProcessWebhookHandler {
    verifier: WebhookVerifier,
    dispatcher: EventDispatcher,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: WebhookVerifier, dispatcher: EventDispatcher) -> Self {
        Self {
            verifier,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, WebhookError> {
        // 1. Verify signature and parse event
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)?;

        // 2. Dispatch to the hook selected by the event type, awaiting
        //    completion before the HTTP response is finalized
        let outcome = self.dispatcher.dispatch(&event).await;

        Ok(match outcome {
            DispatchOutcome::Dispatched(_) => ProcessWebhookResult::Dispatched {
                event_id: event.id,
            },
            DispatchOutcome::Unhandled(event_type) => ProcessWebhookResult::Unhandled {
                event_id: event.id,
                event_type,
            },
            DispatchOutcome::HookFailed(_) => ProcessWebhookResult::HookFailed {
                event_id: event.id,
            },
        })
    }
}
