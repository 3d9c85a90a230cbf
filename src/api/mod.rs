//! HTTP surface: API endpoints and chat webhooks

pub mod routes;
pub mod webhooks;

// Re-export the app builder for convenience
pub use routes::{AppState, build_app};
