//! LLM (`OpenAI`) completion client.
//!
//! Encapsulates the single-turn chat-completion call the agents use for
//! caption and customization text.

use std::time::Duration;

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::AgentError;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Narrow completion capability the agents depend on: one persona, one
/// prompt, one reply. Only the first candidate's text is returned.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, persona: &str, prompt: &str) -> Result<String, AgentError>;
}

/// `OpenAI` chat-completions implementation.
pub struct OpenAiCompletions {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl OpenAiCompletions {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: Option<String>) -> Self {
        Self {
            api_key,
            org_id,
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Builds the single-turn prompt: a system message carrying the persona
    /// and a user message carrying the constructed prompt.
    #[must_use]
    pub fn build_prompt(persona: &str, prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(persona.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(prompt.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }
}

/// Converts a prompt into the chat-completions request body.
fn build_request_body(model: &str, prompt: &[ChatCompletionMessage]) -> Value {
    let messages: Vec<Value> = prompt
        .iter()
        .map(|m| {
            let role = match m.role {
                MessageRole::system => "system",
                MessageRole::assistant => "assistant",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
            };
            let text = match &m.content {
                Content::Text(t) => t.clone(),
                _ => String::new(),
            };
            json!({"role": role, "content": text})
        })
        .collect();

    json!({"model": model, "messages": messages})
}

#[async_trait]
impl CompletionClient for OpenAiCompletions {
    async fn complete(&self, persona: &str, prompt: &str) -> Result<String, AgentError> {
        let request_body =
            build_request_body(&self.model_name, &Self::build_prompt(persona, prompt));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::Generation(format!("Failed to build HTTP client: {e}")))?;

        let mut request = client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body);
        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        debug!(model = %self.model_name, "Sending completion request");

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::Generation(format!("Completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response body: {e}"));
            return Err(AgentError::Generation(format!(
                "Completion API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            AgentError::Generation(format!("Failed to parse completion response: {e}"))
        })?;

        let text = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(std::string::ToString::to_string);

        text.ok_or_else(|| AgentError::Generation("No text in completion response".to_string()))
    }
}
