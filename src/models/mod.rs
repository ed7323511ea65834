pub mod binding;
pub mod event;
pub mod message;
pub mod subscription;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use binding::{BindingInvocation, BindingRequest};
pub use event::CloudEvent;
pub use message::{InboundMessage, MessageResponse};
pub use subscription::{SubscriptionDescriptor, SUBSCRIPTIONS};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Acknowledgement returned to the sidecar for pushed events and bindings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub status: String,
    pub binding_response: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub status: String,
    pub response: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    pub status: String,
    pub topic: String,
}
