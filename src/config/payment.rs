//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret (live)
    pub stripe_webhook_secret: String,

    /// Stripe webhook signing secret for test-mode endpoints
    pub stripe_webhook_secret_test: Option<String>,

    /// Default currency for payment intents
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Redirect URL after a completed checkout
    #[serde(default = "default_success_url")]
    pub checkout_success_url: String,

    /// Redirect URL after an abandoned checkout
    #[serde(default = "default_cancel_url")]
    pub checkout_cancel_url: String,

    /// Timeout for webhook hook invocations, in seconds
    #[serde(default = "default_hook_timeout")]
    pub hook_timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    /// Select the webhook signing secret matching the API key mode.
    ///
    /// A test-mode API key uses the test signing secret when one is
    /// configured; every other combination uses the live secret.
    pub fn active_webhook_secret(&self) -> &str {
        match (&self.stripe_webhook_secret_test, self.is_test_mode()) {
            (Some(test_secret), true) => test_secret,
            _ => &self.stripe_webhook_secret,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if let Some(test_secret) = &self.stripe_webhook_secret_test {
            if !test_secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }

        // ISO 4217 currency codes are three letters
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }

        if self.hook_timeout_secs == 0 || self.hook_timeout_secs > 120 {
            return Err(ValidationError::InvalidHookTimeout);
        }

        Ok(())
    }
}

fn default_currency() -> String {
    "inr".to_string()
}

fn default_success_url() -> String {
    "http://localhost:4242/success.html".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:4242/cancel.html".to_string()
}

fn default_hook_timeout() -> u64 {
    10
}
