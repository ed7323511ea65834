use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const UNKNOWN_BINDING: &str = "unknown";

/// Payload delivered by an input binding trigger.
///
/// A `metadata` value that is not an object reads as empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BindingInvocation {
    #[serde(default, deserialize_with = "lenient_object")]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub data: Value,
}

fn lenient_object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

impl BindingInvocation {
    pub fn binding_name(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_BINDING)
    }
}

/// Body of an output binding request sent to the sidecar.
#[derive(Debug, Serialize)]
pub struct BindingRequest<'a> {
    pub data: &'a Value,
    pub operation: &'a str,
    #[serde(skip_serializing_if = "no_metadata")]
    pub metadata: &'a HashMap<String, String>,
}

fn no_metadata(metadata: &&HashMap<String, String>) -> bool {
    metadata.is_empty()
}
