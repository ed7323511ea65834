use axum::{extract::State, Json};

use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{
    AckResponse, CloudEvent, InboundMessage, PublishResponse, SubscriptionDescriptor,
    SUBSCRIPTIONS,
};
use crate::services::AppState;

pub async fn subscribe() -> Json<&'static [SubscriptionDescriptor]> {
    Json(SUBSCRIPTIONS)
}

/// Delivery endpoint for the `messages` topic.
///
/// Always acknowledges; delivery is at-least-once and nothing is deduplicated.
pub async fn receive_topic_message(JsonBody(event): JsonBody<CloudEvent>) -> Json<AckResponse> {
    let message = event.message();

    tracing::info!(
        event_id = event.id.as_deref().unwrap_or_default(),
        pubsub = event.pubsubname.as_deref().unwrap_or_default(),
        topic = event.topic.as_deref().unwrap_or_default(),
        traceparent = event.traceparent.as_deref().unwrap_or_default(),
        message = %message,
        "Received message via pub/sub"
    );

    Json(AckResponse {
        status: "Message processed successfully".to_string(),
    })
}

pub async fn publish_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InboundMessage>,
) -> Result<Json<PublishResponse>, AppError> {
    let config = &state.config;
    let data = serde_json::to_value(&request)?;

    state
        .sidecar
        .publish_event(&config.pubsub_name, &config.publish_topic, &data)
        .await
        .map_err(AppError::upstream("Failed to publish event"))?;

    tracing::info!(
        pubsub = %config.pubsub_name,
        topic = %config.publish_topic,
        "Event published"
    );

    Ok(Json(PublishResponse {
        status: "Event published".to_string(),
        topic: config.publish_topic.clone(),
    }))
}
