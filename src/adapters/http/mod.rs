//! HTTP adapter - REST API exposing payment operations and the webhook
//! receiver.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::payment_routes;
