use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AgentError;

/// Tour package document as stored in the package store. `extra` keeps any
/// fields the struct does not model, so documents survive a customization
/// round trip without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourPackage {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub destination: String,
    pub duration: u32,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub is_customized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_package_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TourPackage {
    pub fn new(id: &str, destination: &str, duration: u32, activities: Vec<String>) -> Self {
        TourPackage {
            id: id.to_string(),
            destination: destination.to_string(),
            duration,
            activities,
            is_customized: false,
            original_package_id: None,
            extra: Map::new(),
        }
    }

    /// Derives a customized package from a base package and a modification
    /// mapping. Modified fields overlay the base; the derivation fields are
    /// forced afterwards so a modification cannot unset them, and the id is
    /// cleared for the store to assign. A modification that does not fit the
    /// package shape fails with a generation error.
    pub fn customized_from(
        base: &TourPackage,
        modifications: &Map<String, Value>,
    ) -> Result<TourPackage, AgentError> {
        let serialized = serde_json::to_value(base)
            .map_err(|e| AgentError::Generation(e.to_string()))?;
        let mut doc = match serialized {
            Value::Object(doc) => doc,
            _ => {
                return Err(AgentError::Generation(
                    "package did not serialize to an object".to_string(),
                ));
            }
        };

        for (key, value) in modifications {
            doc.insert(key.clone(), value.clone());
        }
        doc.remove("_id");
        doc.insert("is_customized".to_string(), Value::Bool(true));
        doc.insert(
            "original_package_id".to_string(),
            Value::String(base.id.clone()),
        );

        serde_json::from_value(Value::Object(doc)).map_err(|e| {
            AgentError::Generation(format!("modifications do not fit the package shape: {}", e))
        })
    }
}
