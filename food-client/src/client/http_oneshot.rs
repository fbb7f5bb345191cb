// food-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-process transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, decode_response};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through tower's `oneshot`, so a backend that
/// lives in the same process is reached without a socket.
///
/// # Example
///
/// ```ignore
/// use food_client::OneshotHttpClient;
///
/// let client = OneshotHttpClient::new(food_api_mock::router(state));
/// let food: shared::Food = client.get("/foods/1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - fully built Router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn build_request(
        &self,
        method: http::Method,
        path: &str,
        body: Body,
    ) -> Result<Request<Body>, ClientError> {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = &self.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Transport(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Transport(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read body: {}", e)))?;

        decode_response(status, &body_bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::GET, path, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(http::Method::POST, path, Body::from(bytes))?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::DELETE, path, Body::empty())?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::routing::get;

    #[tokio::test]
    async fn test_oneshot_roundtrip() {
        let router = Router::new().route("/ping", get(|| async { Json(vec![1, 2, 3]) }));
        let client = OneshotHttpClient::new(router);

        let values: Vec<i32> = client.get("/ping").await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let err = client.get::<Vec<i32>>("/missing").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
