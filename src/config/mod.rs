//! Typed configuration loaded from the environment.
//!
//! Settings come from `PAYRELAY`-prefixed environment variables (a `.env`
//! file is honored in development), with `__` separating nested sections,
//! e.g. `PAYRELAY__SERVER__PORT=4242`. Loading deserializes into typed
//! sections; `validate()` then applies the semantic checks that serde
//! cannot express.
//!
//! ```no_run
//! use payrelay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root configuration for the service.
///
/// The `server` section is fully defaulted; `payment` carries the
/// required Stripe credentials and must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, environment, and middleware settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Stripe keys, webhook secrets, and checkout settings
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a
    /// value cannot be parsed into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYRELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Run semantic validation across every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
