//! Trip customization pipeline: fetch the base package, ask the model for
//! modifications, persist the derived package.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use super::Agent;
use crate::ai::CompletionClient;
use crate::core::message::Message;
use crate::core::models::TourPackage;
use crate::errors::AgentError;
use crate::store::PackageStore;

const CUSTOMIZE_PERSONA: &str = "You are a travel expert customizing tour packages.";

pub struct TripPlannerAgent {
    store: Arc<dyn PackageStore>,
    completions: Arc<dyn CompletionClient>,
    public_base_url: String,
}

impl TripPlannerAgent {
    pub fn new(
        store: Arc<dyn PackageStore>,
        completions: Arc<dyn CompletionClient>,
        public_base_url: String,
    ) -> Self {
        Self {
            store,
            completions,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Agent for TripPlannerAgent {
    fn name(&self) -> &'static str {
        "trip_planner"
    }

    async fn process(&self, message: &Message) -> Result<Map<String, Value>, AgentError> {
        let tour_id = message
            .str_field("tour_id")
            .ok_or_else(|| AgentError::Validation("missing required field: tour_id".to_string()))?;

        // Resolve the base package before spending a completion call on it
        let base = self
            .store
            .find_tour(tour_id)
            .await?
            .ok_or_else(|| AgentError::NotFound(tour_id.to_string()))?;

        let empty = Map::new();
        let needs = message.map_field("customization_needs").unwrap_or(&empty);

        let prompt = build_customization_prompt(&base, needs);
        let reply = self.completions.complete(CUSTOMIZE_PERSONA, &prompt).await?;
        let modifications = parse_modifications(&reply)?;

        let customized = TourPackage::customized_from(&base, &modifications)?;
        let package_id = self.store.insert_customized(customized).await?;
        info!(%tour_id, %package_id, "Stored customized package");

        let mut data = Map::new();
        data.insert("package_id".to_string(), Value::String(package_id.clone()));
        data.insert(
            "package_url".to_string(),
            Value::String(format!("{}/tours/{}", self.public_base_url, package_id)),
        );
        Ok(data)
    }
}

fn build_customization_prompt(base: &TourPackage, needs: &Map<String, Value>) -> String {
    let needs_text = if needs.is_empty() {
        "none given".to_string()
    } else {
        Value::Object(needs.clone()).to_string()
    };
    format!(
        "Customize this tour package for the customer.\n\
         Destination: {}\n\
         Duration: {} days\n\
         Activities: {}\n\
         Customer needs: {}\n\
         Reply with a JSON object containing only the fields to change.",
        base.destination,
        base.duration,
        base.activities.join(", "),
        needs_text,
    )
}

/// Extracts the modification mapping from a completion reply. Model output
/// is often wrapped in prose or code fences, so this takes the first
/// balanced JSON object in the text; a reply without one is a generation
/// failure, never silently ignored.
pub fn parse_modifications(text: &str) -> Result<Map<String, Value>, AgentError> {
    let candidate = first_json_object(text).ok_or_else(|| {
        AgentError::Generation(format!("No JSON object in completion reply: {text}"))
    })?;
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| AgentError::Generation(format!("Unparseable modifications: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AgentError::Generation(
            "Modifications are not a JSON object".to_string(),
        )),
    }
}

fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
