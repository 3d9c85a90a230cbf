use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use safar::agents::{Agent, ContentCreatorAgent};
use safar::ai::CompletionClient;
use safar::core::message::Message;
use safar::errors::AgentError;
use safar::publish::{ContentScheduler, ScheduleReceipt, ScheduleSlot};
use safar::video::{OutputArtifact, SourceVideo, VideoComposer, VideoSource};

// Shared call log: each stage double appends its name, so tests can assert
// both ordering and which stages never ran.
type CallLog = Arc<Mutex<Vec<&'static str>>>;

struct StubSource {
    log: CallLog,
    fail: bool,
}

#[async_trait]
impl VideoSource for StubSource {
    async fn fetch(&self, _url: &str) -> Result<SourceVideo, AgentError> {
        self.log.lock().unwrap().push("fetch");
        if self.fail {
            return Err(AgentError::Fetch("video unavailable".to_string()));
        }
        Ok(SourceVideo {
            id: "abc123".to_string(),
            path: PathBuf::from("downloads/abc123.mp4"),
            title: "Rome in 4K".to_string(),
            duration_seconds: 213,
        })
    }
}

struct StubCompletions {
    log: CallLog,
    reply: String,
    prompts: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl CompletionClient for StubCompletions {
    async fn complete(&self, persona: &str, prompt: &str) -> Result<String, AgentError> {
        self.log.lock().unwrap().push("complete");
        self.prompts
            .lock()
            .unwrap()
            .push((persona.to_string(), prompt.to_string()));
        Ok(self.reply.clone())
    }
}

struct StubComposer {
    log: CallLog,
    captions: Mutex<Vec<String>>,
    max_seconds_seen: AtomicU32,
}

#[async_trait]
impl VideoComposer for StubComposer {
    async fn render(
        &self,
        source: &SourceVideo,
        caption: &str,
        max_seconds: u32,
    ) -> Result<OutputArtifact, AgentError> {
        self.log.lock().unwrap().push("render");
        self.captions.lock().unwrap().push(caption.to_string());
        self.max_seconds_seen.store(max_seconds, Ordering::SeqCst);
        Ok(OutputArtifact {
            path: PathBuf::from(format!("generated/short_{}.mp4", source.id)),
        })
    }
}

struct RecordingScheduler {
    log: CallLog,
    slots: Mutex<Vec<ScheduleSlot>>,
}

#[async_trait]
impl ContentScheduler for RecordingScheduler {
    async fn schedule(
        &self,
        _artifact: &OutputArtifact,
        _caption: &str,
        slot: &ScheduleSlot,
    ) -> Result<ScheduleReceipt, AgentError> {
        self.log.lock().unwrap().push("schedule");
        self.slots.lock().unwrap().push(slot.clone());
        Ok(ScheduleReceipt {
            scheduled: true,
            platform: slot
                .platform
                .clone()
                .unwrap_or_else(|| "default".to_string()),
            scheduled_for: slot
                .publish_at
                .unwrap_or_else(|| Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        })
    }
}

struct Harness {
    agent: ContentCreatorAgent,
    log: CallLog,
    completions: Arc<StubCompletions>,
    composer: Arc<StubComposer>,
    scheduler: Arc<RecordingScheduler>,
}

fn harness(fetch_fails: bool) -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let completions = Arc::new(StubCompletions {
        log: log.clone(),
        reply: "Rome like you have never seen it!".to_string(),
        prompts: Mutex::new(Vec::new()),
    });
    let composer = Arc::new(StubComposer {
        log: log.clone(),
        captions: Mutex::new(Vec::new()),
        max_seconds_seen: AtomicU32::new(0),
    });
    let scheduler = Arc::new(RecordingScheduler {
        log: log.clone(),
        slots: Mutex::new(Vec::new()),
    });
    let agent = ContentCreatorAgent::new(
        Arc::new(StubSource {
            log: log.clone(),
            fail: fetch_fails,
        }),
        completions.clone(),
        composer.clone(),
        scheduler.clone(),
        60,
    );
    Harness {
        agent,
        log,
        completions,
        composer,
        scheduler,
    }
}

#[tokio::test]
async fn test_happy_path_runs_stages_in_order() {
    let h = harness(false);
    let message = Message::content_creation("https://youtube.com/watch?v=abc123")
        .with_field("platform", Value::String("instagram".to_string()))
        .with_field(
            "schedule_time",
            Value::String("2026-09-01T10:00:00Z".to_string()),
        );

    let result = h.agent.handle(&message).await;

    assert!(result.is_success(), "unexpected error: {:?}", result.error);
    assert_eq!(
        *h.log.lock().unwrap(),
        vec!["fetch", "complete", "render", "schedule"]
    );

    // Success data carries the artifact, caption and scheduling facts
    assert_eq!(result.data["video_path"], "generated/short_abc123.mp4");
    assert_eq!(result.data["caption"], "Rome like you have never seen it!");
    assert_eq!(result.data["platform"], "instagram");
    assert_eq!(result.data["scheduled_for"], "2026-09-01T10:00:00+00:00");

    // The requested slot reached the scheduler intact
    let slots = h.scheduler.slots.lock().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].platform.as_deref(), Some("instagram"));
    assert_eq!(
        slots[0].publish_at,
        Some(Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn test_caption_prompt_uses_persona_and_title() {
    let h = harness(false);
    let message = Message::content_creation("https://youtube.com/watch?v=abc123");

    let result = h.agent.handle(&message).await;
    assert!(result.is_success());

    let prompts = h.completions.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let (persona, prompt) = &prompts[0];
    assert_eq!(
        persona,
        "You are a social media expert creating engaging captions."
    );
    assert!(prompt.contains("Rome in 4K"));
}

#[tokio::test]
async fn test_composer_receives_the_generated_caption_and_ceiling() {
    let h = harness(false);
    let message = Message::content_creation("https://youtube.com/watch?v=abc123");

    h.agent.handle(&message).await;

    let captions = h.composer.captions.lock().unwrap();
    assert_eq!(captions.as_slice(), ["Rome like you have never seen it!"]);
    assert_eq!(h.composer.max_seconds_seen.load(Ordering::SeqCst), 60);
}

#[tokio::test]
async fn test_fetch_failure_short_circuits_the_pipeline() {
    let h = harness(true);
    let message = Message::content_creation("https://youtube.com/watch?v=abc123");

    let result = h.agent.handle(&message).await;

    assert_eq!(result.error_kind(), Some("fetch"));
    // Caption, compose and schedule never ran
    assert_eq!(*h.log.lock().unwrap(), vec!["fetch"]);
}

#[tokio::test]
async fn test_unsupported_content_type_is_rejected_before_any_stage() {
    let h = harness(false);
    let message = Message::content_creation("https://vimeo.com/12345")
        .with_field("content_type", Value::String("vimeo".to_string()));

    let result = h.agent.handle(&message).await;

    assert_eq!(result.error_kind(), Some("validation"));
    assert!(h.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_or_invalid_url_is_rejected() {
    let h = harness(false);

    // Missing content_url
    let mut message = Message::content_creation("https://youtube.com/watch?v=abc123");
    message.payload.remove("content_url");
    let result = h.agent.handle(&message).await;
    assert_eq!(result.error_kind(), Some("validation"));

    // Unparseable content_url
    let message = Message::content_creation("not a url");
    let result = h.agent.handle(&message).await;
    assert_eq!(result.error_kind(), Some("validation"));
    assert!(h.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_schedule_time_is_rejected() {
    let h = harness(false);
    let message = Message::content_creation("https://youtube.com/watch?v=abc123")
        .with_field("schedule_time", Value::String("tomorrow".to_string()));

    let result = h.agent.handle(&message).await;

    assert_eq!(result.error_kind(), Some("validation"));
    assert!(h.log.lock().unwrap().is_empty());
}
