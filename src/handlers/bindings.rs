use axum::{extract::State, Json};

use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{AckResponse, BindingInvocation, InboundMessage, SendMessageResponse};
use crate::services::AppState;

const CREATE_OPERATION: &str = "create";

pub async fn receive_binding(JsonBody(invocation): JsonBody<BindingInvocation>) -> Json<AckResponse> {
    tracing::info!(
        binding = %invocation.binding_name(),
        data = %invocation.data,
        "Received data from binding"
    );

    Json(AckResponse {
        status: "Binding data processed successfully".to_string(),
    })
}

/// Forward a message to the configured output binding with operation `create`.
pub async fn send_message(
    State(state): State<AppState>,
    JsonBody(message): JsonBody<InboundMessage>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let binding = &state.config.output_binding;
    let data = serde_json::to_value(&message)?;
    let metadata = message.string_metadata();

    let response = state
        .sidecar
        .invoke_binding(binding, CREATE_OPERATION, &data, &metadata)
        .await
        .map_err(AppError::upstream("Failed to send message"))?;

    tracing::info!(binding = %binding, response = %response, "Message sent to output binding");

    Ok(Json(SendMessageResponse {
        status: "Message sent".to_string(),
        binding_response: "Success".to_string(),
    }))
}
