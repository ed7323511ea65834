use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const NO_MESSAGE: &str = "No message provided";

/// Event envelope pushed by the sidecar to subscriber routes.
///
/// Every key is optional so that a bare mapping such as `{"data": {...}}`
/// is accepted as well as a full CloudEvent. Envelope keys holding anything
/// other than a string read as absent rather than rejecting the event.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CloudEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub specversion: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub datacontenttype: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pubsubname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: Option<String>,
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub traceid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub traceparent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tracestate: Option<String>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl CloudEvent {
    /// The `message` field of the application payload, or [`NO_MESSAGE`].
    pub fn message(&self) -> String {
        match self.data.as_ref().and_then(|data| data.get("message")) {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => NO_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let event: CloudEvent = serde_json::from_value(json!({
            "id": "5929aaac-a5e2-4ca1-859c-edfe73f11565",
            "source": "publisher",
            "type": "com.dapr.event.sent",
            "specversion": "1.0",
            "datacontenttype": "application/json",
            "pubsubname": "pubsub",
            "topic": "messages",
            "traceparent": "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
            "data": { "message": "hello" },
            "time": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(event.event_type.as_deref(), Some("com.dapr.event.sent"));
        assert_eq!(event.topic.as_deref(), Some("messages"));
        assert_eq!(event.message(), "hello");
        assert_eq!(event.extensions.get("time"), Some(&json!("2024-01-01T00:00:00Z")));
    }

    #[test]
    fn test_missing_data_uses_placeholder() {
        let event: CloudEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.message(), NO_MESSAGE);
    }

    #[test]
    fn test_non_object_data_uses_placeholder() {
        let event: CloudEvent = serde_json::from_value(json!({ "data": "plain text" })).unwrap();
        assert_eq!(event.message(), NO_MESSAGE);
    }

    #[test]
    fn test_non_string_envelope_keys_read_as_absent() {
        let event: CloudEvent = serde_json::from_value(json!({
            "id": 42,
            "topic": null,
            "source": { "region": "eu" },
            "type": ["a", "b"],
            "traceparent": true,
            "data": { "message": "x" }
        }))
        .unwrap();

        assert_eq!(event.id, None);
        assert_eq!(event.topic, None);
        assert_eq!(event.source, None);
        assert_eq!(event.event_type, None);
        assert_eq!(event.traceparent, None);
        assert_eq!(event.message(), "x");
    }

    #[test]
    fn test_non_string_message_is_rendered() {
        let event: CloudEvent = serde_json::from_value(json!({ "data": { "message": 42 } })).unwrap();
        assert_eq!(event.message(), "42");
    }
}
