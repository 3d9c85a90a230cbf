//! Pipeline agents and the contract they satisfy

pub mod content_creator;
pub mod trip_planner;

// Re-export the agents for convenience
pub use content_creator::ContentCreatorAgent;
pub use trip_planner::TripPlannerAgent;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::error;

use crate::core::message::{Message, PipelineResult};
use crate::errors::AgentError;

/// Contract every pipeline agent satisfies.
///
/// `process` runs the staged pipeline and returns its success payload;
/// `handle` wraps the outcome into the uniform envelope, logging failures
/// once at this boundary so the router and transports never have to.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(&self, message: &Message) -> Result<Map<String, Value>, AgentError>;

    async fn handle(&self, message: &Message) -> PipelineResult {
        match self.process(message).await {
            Ok(data) => PipelineResult::success(data),
            Err(e) => {
                error!(agent = self.name(), kind = e.kind(), "Pipeline failed: {}", e);
                PipelineResult::error(e)
            }
        }
    }
}
