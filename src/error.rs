//! Error types for the gateway and its sidecar client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the sidecar's local HTTP API.
#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("sidecar returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid sidecar configuration: {0}")]
    Config(String),

    #[error("invalid invocation target: {0}")]
    InvalidTarget(String),
}

/// Errors surfaced at the HTTP boundary.
///
/// Rendered as `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: SidecarError,
    },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(context: &'static str) -> impl FnOnce(SidecarError) -> Self {
        move |source| Self::Upstream { context, source }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Failed to serialize payload: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, detail = %detail, "Request failed");
        } else {
            tracing::debug!(status = %status, detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
