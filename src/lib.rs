//! REST gateway wired to a Dapr sidecar.
//!
//! Serves status/echo endpoints, advertises pub/sub subscriptions, accepts
//! events and input bindings pushed by the sidecar, and forwards publish,
//! output binding and service invocation requests to the sidecar's local
//! HTTP API.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;

pub use config::Config;
pub use error::{AppError, SidecarError};
pub use services::{AppState, DaprClient, Sidecar};

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(handlers::status::get_status))
        .route("/healthz", get(handlers::status::health_check))
        .route("/echo", post(handlers::echo::echo_message))
        // Sidecar-facing
        .route("/dapr/subscribe", get(handlers::pubsub::subscribe))
        .route("/messages", post(handlers::pubsub::receive_topic_message))
        .route("/binding", post(handlers::bindings::receive_binding))
        // Outbound through the sidecar
        .route("/send-message", post(handlers::bindings::send_message))
        .route(
            "/invoke-service/:service_name",
            get(handlers::invoke::invoke_service),
        )
        .route("/publish-event", post(handlers::pubsub::publish_event))
        .with_state(state);

    middleware::with_request_tracing(router)
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn run<F>(config: Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.listen_addr()?;
    let state = AppState::from_config(config)?;

    tracing::info!(
        sidecar = %state.config.dapr_base_url(),
        service = %state.config.service_name,
        "Sidecar client configured"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
