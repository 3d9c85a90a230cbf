//! Content scheduling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::AgentError;
use crate::video::OutputArtifact;

/// Requested scheduling parameters. Both fields are optional; the scheduler
/// fills in fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub platform: Option<String>,
    pub publish_at: Option<DateTime<Utc>>,
}

/// Outcome of the publish stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReceipt {
    pub scheduled: bool,
    pub platform: String,
    pub scheduled_for: DateTime<Utc>,
}

/// Publish capability: hand a rendered clip to a scheduling sink.
#[async_trait]
pub trait ContentScheduler: Send + Sync {
    async fn schedule(
        &self,
        artifact: &OutputArtifact,
        caption: &str,
        slot: &ScheduleSlot,
    ) -> Result<ScheduleReceipt, AgentError>;
}

/// Stand-in scheduler. Records the request in the logs and reports success
/// without contacting any publishing platform.
pub struct StubScheduler;

#[async_trait]
impl ContentScheduler for StubScheduler {
    async fn schedule(
        &self,
        artifact: &OutputArtifact,
        caption: &str,
        slot: &ScheduleSlot,
    ) -> Result<ScheduleReceipt, AgentError> {
        let platform = slot
            .platform
            .clone()
            .unwrap_or_else(|| "default".to_string());
        let scheduled_for = slot.publish_at.unwrap_or_else(Utc::now);
        info!(
            path = %artifact.path.display(),
            %platform,
            %scheduled_for,
            caption_len = caption.len(),
            "Recorded content for scheduling (stub, nothing is published)"
        );
        Ok(ScheduleReceipt {
            scheduled: true,
            platform,
            scheduled_for,
        })
    }
}
