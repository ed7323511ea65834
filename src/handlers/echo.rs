use axum::Json;

use crate::extract::JsonBody;
use crate::models::{InboundMessage, MessageResponse};

pub async fn echo_message(JsonBody(request): JsonBody<InboundMessage>) -> Json<MessageResponse> {
    Json(echo(&request))
}

pub fn echo(request: &InboundMessage) -> MessageResponse {
    MessageResponse {
        message: format!("You sent: {}", request.message),
        processed: true,
    }
}
