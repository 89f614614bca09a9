//! Request extractors shared by the REST handlers.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose parse failures surface as `VALIDATION_FAILED`.
///
/// An empty body is read as `{}`, so bodies made only of optional fields may
/// be omitted. The `Content-Type` header is not checked.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request("body", e.body_text()))?;

        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::bad_request("body", format!("Invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Force {
        #[serde(default)]
        force: bool,
    }

    async fn extract(body: &'static str) -> Result<Force, ApiError> {
        let request = axum::http::Request::builder().body(Body::from(body)).unwrap();
        JsonBody::<Force>::from_request(request, &()).await.map(|JsonBody(v)| v)
    }

    #[tokio::test]
    async fn empty_body_uses_defaults() {
        assert!(!extract("").await.unwrap().force);
    }

    #[tokio::test]
    async fn body_is_parsed() {
        assert!(extract(r#"{"force": true}"#).await.unwrap().force);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let err = extract("{force").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
