//! Client for the sidecar's local HTTP API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::{Config, DEFAULT_DAPR_TIMEOUT_SECS};
use crate::error::SidecarError;
use crate::models::BindingRequest;

pub const API_TOKEN_HEADER: &str = "dapr-api-token";
const API_VERSION: &str = "v1.0";

/// Outbound operations the gateway performs through the sidecar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sidecar: Send + Sync {
    /// Publish `data` to `topic` on the named pubsub component.
    async fn publish_event(&self, pubsub: &str, topic: &str, data: &Value)
        -> Result<(), SidecarError>;

    /// Invoke an output binding and return whatever the binding answered.
    async fn invoke_binding(
        &self,
        name: &str,
        operation: &str,
        data: &Value,
        metadata: &HashMap<String, String>,
    ) -> Result<Value, SidecarError>;

    /// Call `method` on the remote app `app_id` and return its response body.
    async fn invoke_method(
        &self,
        app_id: &str,
        method: &str,
        verb: Method,
        data: &Value,
    ) -> Result<Value, SidecarError>;
}

/// [`Sidecar`] backed by the Dapr HTTP API.
#[derive(Debug, Clone)]
pub struct DaprClient {
    client: Client,
    base_url: String,
}

impl DaprClient {
    pub fn new(config: &Config) -> Result<Self, SidecarError> {
        Self::build(
            config.dapr_base_url(),
            config.api_token(),
            Duration::from_secs(config.dapr_http_timeout_secs),
        )
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, SidecarError> {
        Self::build(
            url.into(),
            None,
            Duration::from_secs(DEFAULT_DAPR_TIMEOUT_SECS),
        )
    }

    fn build(base_url: String, token: Option<&str>, timeout: Duration) -> Result<Self, SidecarError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| SidecarError::Config(format!("DAPR_API_TOKEN: {}", e)))?;
            headers.insert(API_TOKEN_HEADER, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SidecarError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SidecarError::Status { status, body })
    }
}

#[async_trait]
impl Sidecar for DaprClient {
    async fn publish_event(
        &self,
        pubsub: &str,
        topic: &str,
        data: &Value,
    ) -> Result<(), SidecarError> {
        let url = self.url(&format!("publish/{}/{}", pubsub, topic));
        tracing::debug!(pubsub = %pubsub, topic = %topic, "Publishing event");

        self.send(self.client.post(&url).json(data)).await?;
        Ok(())
    }

    async fn invoke_binding(
        &self,
        name: &str,
        operation: &str,
        data: &Value,
        metadata: &HashMap<String, String>,
    ) -> Result<Value, SidecarError> {
        let url = self.url(&format!("bindings/{}", name));
        tracing::debug!(binding = %name, operation = %operation, "Invoking output binding");

        let body = BindingRequest {
            data,
            operation,
            metadata,
        };
        let response = self.send(self.client.post(&url).json(&body)).await?;
        read_body(response).await
    }

    async fn invoke_method(
        &self,
        app_id: &str,
        method: &str,
        verb: Method,
        data: &Value,
    ) -> Result<Value, SidecarError> {
        let url = self.url(&invoke_path(app_id, method)?);
        tracing::debug!(app_id = %app_id, method = %method, verb = %verb, "Invoking remote method");

        let response = self
            .send(self.client.request(verb, &url).json(data))
            .await?;
        read_body(response).await
    }
}

/// Characters that would end or redirect the path of an invocation URL.
const FORBIDDEN_CHARS: &[char] = &['\\', '?', '#'];

/// Path below the API version for invoking `method` on `app_id`.
///
/// The URL parser resolves `.` and `..` segments (including their
/// percent-encoded forms), so values that would climb out of
/// `invoke/{app_id}/method/` are rejected.
pub fn invoke_path(app_id: &str, method: &str) -> Result<String, SidecarError> {
    if app_id.is_empty()
        || app_id.contains('/')
        || app_id.contains(FORBIDDEN_CHARS)
        || has_encoded_separator(app_id)
        || is_dot_segment(app_id)
    {
        return Err(SidecarError::InvalidTarget(format!("app id {:?}", app_id)));
    }

    let method = method.trim_start_matches('/');
    if method.is_empty()
        || method.contains(FORBIDDEN_CHARS)
        || has_encoded_separator(method)
        || method.split('/').any(is_dot_segment)
    {
        return Err(SidecarError::InvalidTarget(format!("method {:?}", method)));
    }

    Ok(format!("invoke/{}/method/{}", app_id, method))
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn has_encoded_separator(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("%2f") || lower.contains("%5c")
}

/// Decode a response body: JSON when it parses, text otherwise, null when empty.
async fn read_body(response: Response) -> Result<Value, SidecarError> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
}
