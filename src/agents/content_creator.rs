//! Content creation pipeline: fetch a source video, caption it, render a
//! short clip, hand it to the scheduler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::info;
use url::Url;

use super::Agent;
use crate::ai::CompletionClient;
use crate::core::message::Message;
use crate::errors::AgentError;
use crate::publish::{ContentScheduler, ScheduleSlot};
use crate::video::{VideoComposer, VideoSource};

const CAPTION_PERSONA: &str = "You are a social media expert creating engaging captions.";

pub struct ContentCreatorAgent {
    video_source: Arc<dyn VideoSource>,
    completions: Arc<dyn CompletionClient>,
    composer: Arc<dyn VideoComposer>,
    scheduler: Arc<dyn ContentScheduler>,
    max_clip_seconds: u32,
}

impl ContentCreatorAgent {
    pub fn new(
        video_source: Arc<dyn VideoSource>,
        completions: Arc<dyn CompletionClient>,
        composer: Arc<dyn VideoComposer>,
        scheduler: Arc<dyn ContentScheduler>,
        max_clip_seconds: u32,
    ) -> Self {
        Self {
            video_source,
            completions,
            composer,
            scheduler,
            max_clip_seconds,
        }
    }

    fn validate(message: &Message) -> Result<(&str, ScheduleSlot), AgentError> {
        let content_type = message.str_field("content_type").unwrap_or_default();
        if content_type != "youtube" {
            return Err(AgentError::Validation(format!(
                "Unsupported content type: {content_type}"
            )));
        }

        let content_url = message.str_field("content_url").ok_or_else(|| {
            AgentError::Validation("missing required field: content_url".to_string())
        })?;
        Url::parse(content_url)
            .map_err(|e| AgentError::Validation(format!("Invalid content_url: {e}")))?;

        let publish_at = match message.str_field("schedule_time") {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| AgentError::Validation(format!("Invalid schedule_time: {e}")))?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        let slot = ScheduleSlot {
            platform: message.str_field("platform").map(str::to_string),
            publish_at,
        };
        Ok((content_url, slot))
    }
}

#[async_trait]
impl Agent for ContentCreatorAgent {
    fn name(&self) -> &'static str {
        "content_creator"
    }

    async fn process(&self, message: &Message) -> Result<Map<String, Value>, AgentError> {
        let (content_url, slot) = Self::validate(message)?;

        let video = self.video_source.fetch(content_url).await?;
        info!(video_id = %video.id, title = %video.title, "Generating caption");

        let prompt = format!(
            "Create a short, engaging caption for a video titled: {}",
            video.title
        );
        let caption = self.completions.complete(CAPTION_PERSONA, &prompt).await?;

        let artifact = self
            .composer
            .render(&video, &caption, self.max_clip_seconds)
            .await?;

        let receipt = self.scheduler.schedule(&artifact, &caption, &slot).await?;

        let mut data = Map::new();
        data.insert(
            "video_path".to_string(),
            Value::String(artifact.path.display().to_string()),
        );
        data.insert("caption".to_string(), Value::String(caption));
        data.insert("platform".to_string(), Value::String(receipt.platform));
        data.insert(
            "scheduled_for".to_string(),
            Value::String(receipt.scheduled_for.to_rfc3339()),
        );
        Ok(data)
    }
}
