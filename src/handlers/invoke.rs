use axum::{
    extract::{Path, Query, State},
    Json,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::InvokeResponse;
use crate::services::{dapr, AppState};

#[derive(Debug, Deserialize)]
pub struct InvokeQuery {
    #[serde(default = "default_method")]
    pub method_name: String,
}

fn default_method() -> String {
    "hello".to_string()
}

/// Call `method_name` on the remote app `service_name` through the sidecar.
///
/// Targets that would leave the invocation path (a `/` in the app id, `..`
/// segments in the method) are rejected with 400 before the sidecar is called.
pub async fn invoke_service(
    State(state): State<AppState>,
    Path(service_name): Path<String>,
    Query(query): Query<InvokeQuery>,
) -> Result<Json<InvokeResponse>, AppError> {
    dapr::invoke_path(&service_name, &query.method_name)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let payload = json!({ "message": "Hello from caller service" });

    let response = state
        .sidecar
        .invoke_method(&service_name, &query.method_name, Method::GET, &payload)
        .await
        .map_err(AppError::upstream("Failed to invoke service"))?;

    tracing::info!(
        app_id = %service_name,
        method = %query.method_name,
        "Service invoked"
    );

    Ok(Json(InvokeResponse {
        status: "Service invoked".to_string(),
        response,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{sidecar_down, state_with};
    use crate::services::dapr::MockSidecar;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_invoke_passes_remote_body_through() {
        let mut sidecar = MockSidecar::new();
        sidecar
            .expect_invoke_method()
            .withf(|app_id, method, verb, data| {
                app_id == "inventory"
                    && method == "stock"
                    && *verb == Method::GET
                    && *data == json!({ "message": "Hello from caller service" })
            })
            .times(1)
            .returning(|_, _, _, _| Ok(json!({ "count": 3 })));

        let Json(response) = invoke_service(
            State(state_with(sidecar)),
            Path("inventory".to_string()),
            Query(InvokeQuery {
                method_name: "stock".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status, "Service invoked");
        assert_eq!(response.response, json!({ "count": 3 }));
    }

    #[test]
    fn test_method_defaults_to_hello() {
        let query: InvokeQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.method_name, "hello");
    }

    #[tokio::test]
    async fn test_traversal_is_rejected_before_calling_sidecar() {
        for (service_name, method_name) in [
            ("inventory", "../../../secrets/vault/db-password"),
            ("inventory", "%2e%2e/state/statestore/key"),
            ("a/b", "hello"),
        ] {
            let err = invoke_service(
                State(state_with(MockSidecar::new())),
                Path(service_name.to_string()),
                Query(InvokeQuery {
                    method_name: method_name.to_string(),
                }),
            )
            .await
            .unwrap_err();

            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert!(err.to_string().starts_with("invalid invocation target: "));
        }
    }

    #[tokio::test]
    async fn test_invoke_failure_is_reported() {
        let mut sidecar = MockSidecar::new();
        sidecar
            .expect_invoke_method()
            .returning(|_, _, _, _| Err(sidecar_down()));

        let err = invoke_service(
            State(state_with(sidecar)),
            Path("inventory".to_string()),
            Query(InvokeQuery {
                method_name: "hello".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to invoke service: "));
    }
}
