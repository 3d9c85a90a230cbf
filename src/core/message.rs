use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::AgentError;

/// Closed set of intents the router understands. Unknown intent strings fail
/// at deserialization, so transports reject them before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ContentCreator,
    TripPlanner,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ContentCreator => "content_creator",
            Intent::TripPlanner => "trip_planner",
        }
    }
}

/// Canonical routed message: a declared intent plus an intent-specific
/// payload. The router never inspects the payload; the owning agent
/// validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub intent: Intent,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Message {
    pub fn new(intent: Intent, payload: Map<String, Value>) -> Self {
        Message { intent, payload }
    }

    /// Message requesting a short promotional video from a source URL.
    pub fn content_creation(content_url: &str) -> Self {
        let mut payload = Map::new();
        payload.insert(
            "content_type".to_string(),
            Value::String("youtube".to_string()),
        );
        payload.insert(
            "content_url".to_string(),
            Value::String(content_url.to_string()),
        );
        Message {
            intent: Intent::ContentCreator,
            payload,
        }
    }

    /// Message requesting customization of a stored tour package.
    pub fn trip_customization(tour_id: &str, customization_needs: Map<String, Value>) -> Self {
        let mut payload = Map::new();
        payload.insert(
            "tour_id".to_string(),
            Value::String(tour_id.to_string()),
        );
        payload.insert(
            "customization_needs".to_string(),
            Value::Object(customization_needs),
        );
        Message {
            intent: Intent::TripPlanner,
            payload,
        }
    }

    /// Inserts an extra payload field, replacing any existing value.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn map_field(&self, key: &str) -> Option<&Map<String, Value>> {
        self.payload.get(key).and_then(Value::as_object)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Uniform outcome envelope every agent returns and the router forwards
/// unchanged. Serializes as `{"status": "success", ...data}` or
/// `{"status": "error", "error": ..., "error_kind": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub status: Status,
    pub data: Map<String, Value>,
    pub error: Option<AgentError>,
}

impl PipelineResult {
    pub fn success(data: Map<String, Value>) -> Self {
        PipelineResult {
            status: Status::Success,
            data,
            error: None,
        }
    }

    pub fn error(error: AgentError) -> Self {
        PipelineResult {
            status: Status::Error,
            data: Map::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn error_kind(&self) -> Option<&'static str> {
        self.error.as_ref().map(AgentError::kind)
    }
}

impl Serialize for PipelineResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra = if self.error.is_some() { 2 } else { 0 };
        let mut map = serializer.serialize_map(Some(1 + self.data.len() + extra))?;
        map.serialize_entry("status", &self.status)?;
        for (key, value) in &self.data {
            map.serialize_entry(key, value)?;
        }
        if let Some(error) = &self.error {
            map.serialize_entry("error", &error.to_string())?;
            map.serialize_entry("error_kind", error.kind())?;
        }
        map.end()
    }
}
