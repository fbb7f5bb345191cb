// food-client/src/client/http.rs
// HTTP client - network transport

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client trait
///
/// Paths are absolute (`/foods/42`). Empty success bodies decode as JSON
/// `null`, so callers that ignore the body can ask for `()` or
/// [`serde::de::IgnoredAny`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Turn a raw status and body into a typed result
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    if !status.is_success() {
        let text = String::from_utf8_lossy(body).into_owned();
        return Err(ClientError::from_status(status, text));
    }

    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };

    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Network HTTP client backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base url must start with http:// or https://, got {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(&self, mut req: reqwest::RequestBuilder) -> ClientResult<T> {
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let req = self.client.get(self.url(path));
        self.send(req).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let req = self.client.post(self.url(path)).json(body);
        self.send(req).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        let req = self.client.delete(self.url(path));
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new("http://localhost:3333/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.url("/foods/1"), "http://localhost:3333/foods/1");
        assert_eq!(client.url("favorites"), "http://localhost:3333/favorites");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = NetworkHttpClient::new("localhost:3333").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_decode_empty_body() {
        let _: IgnoredAny = decode_response(StatusCode::NO_CONTENT, b"").unwrap();
        decode_response::<()>(StatusCode::OK, b" ").unwrap();
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode_response::<IgnoredAny>(StatusCode::NOT_FOUND, b"no food").unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref m) if m == "no food"));
    }

    #[test]
    fn test_decode_bad_json() {
        let err = decode_response::<Vec<i64>>(StatusCode::OK, b"{").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
