//! Webhook hook adapters.

mod logging_hooks;

pub use logging_hooks::LoggingHooks;
