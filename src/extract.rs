//! Request body extraction.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;

/// JSON body extractor that ignores the content type.
///
/// The sidecar posts events as `application/cloudevents+json` or without a
/// content type at all, so the body is parsed regardless of the header.
/// Syntax errors are rejected with 400, schema errors with 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        parse(&bytes).map(JsonBody)
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(bytes).map_err(|err| match err.classify() {
        Category::Data => AppError::Unprocessable(format!("Invalid request body: {}", err)),
        Category::Syntax | Category::Eof | Category::Io => {
            AppError::BadRequest(format!("Malformed JSON body: {}", err))
        }
    })
}
