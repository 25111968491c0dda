//! Payrelay - Stripe payment relay service
//!
//! Forwards payment operations (payment intents, subscriptions, checkout
//! sessions) to Stripe and verifies inbound webhooks before dispatching
//! them to pluggable event hooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
