//! Safar - a multi-channel assistant that turns travel and content requests
//! into staged agent pipelines.
//!
//! Inbound requests arrive over the HTTP API or the WhatsApp/Telegram
//! webhooks, are normalized into a canonical [`core::message::Message`], and
//! are dispatched by the [`router::AgentRouter`] to the agent registered for
//! the message's intent:
//!
//! 1. The content creator fetches a source video, captions it with an LLM,
//!    renders a short clip, and hands it to the scheduler.
//! 2. The trip planner loads a stored tour package, asks the LLM for
//!    modifications, and persists the customized package.
//!
//! External collaborators (completions, video download, rendering,
//! persistence, scheduling) sit behind narrow async traits so agents are
//! wired by injection and tested with doubles.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use safar::agents::TripPlannerAgent;
//! use safar::ai::OpenAiCompletions;
//! use safar::core::message::{Intent, Message};
//! use safar::router::AgentRouter;
//! use safar::store::MemoryPackageStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     safar::setup_logging();
//!
//!     let completions = Arc::new(OpenAiCompletions::new("sk-demo".to_string(), None, None));
//!     let store = Arc::new(MemoryPackageStore::new());
//!
//!     let mut router = AgentRouter::new();
//!     router.register(
//!         Intent::TripPlanner,
//!         Arc::new(TripPlannerAgent::new(
//!             store,
//!             completions,
//!             "https://safar.fun".to_string(),
//!         )),
//!     );
//!
//!     let message = Message::trip_customization("T1", serde_json::Map::new());
//!     let result = router.dispatch(&message).await;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! }
//! ```

// Module declarations
pub mod agents;
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod publish;
pub mod router;
pub mod store;
pub mod video;

/// Configure structured logging with JSON output.
///
/// Installs tracing-subscriber with an env-filter (`RUST_LOG`, defaulting to
/// `info`) and a JSON formatter. Call once at process start.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
