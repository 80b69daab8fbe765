//! Async HTTP client for the platform control-plane API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiError, ApiResult};
use super::protocol::{DataEnvelope, ErrorBody};
use crate::config::{ApiSettings, SettingsError};

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async client for the platform API.
///
/// Every request carries the secret key as a bearer token. Successful
/// responses are unwrapped from their `{"data": ...}` envelope; failed ones
/// are classified by status into an [`ApiError`].
///
/// # Example
///
/// ```ignore
/// use workbook_agent::api::{ApiClient, protocol::File};
///
/// let client = ApiClient::new("https://platform.flatfile.com/api/v1", "sk_...")?;
/// let file: File = client.get("/files/us_fl_123", &[]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(
            base_url,
            secret_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            timeout,
        })
    }

    /// Create a client from the `[api]` settings section.
    ///
    /// The secret key is resolved through environment variable expansion.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, SettingsError> {
        let secret_key = settings.resolved_secret_key()?;
        Self::with_timeout(&settings.base_url, secret_key, settings.timeout())
            .map_err(|e| SettingsError::InvalidConfig(format!("cannot build API client: {}", e)))
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET` a resource.
    pub async fn get<R>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let builder = self.http.get(self.url(path)).query(query);
        self.execute(builder).await
    }

    /// `DELETE` a resource.
    pub async fn delete<R>(&self, path: &str) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let builder = self.http.delete(self.url(path));
        self.execute(builder).await
    }

    /// Send a request with a JSON body and wait for its response.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization of `body` fails or the request cannot be sent or
    ///   times out ([`ApiError::Transport`])
    /// - The platform answers with a non-success status
    /// - Deserialization of the response fails
    pub async fn send<B, R>(&self, method: Method, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let builder = self.http.request(method, self.url(path)).json(body);
        self.execute(builder).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<R>(&self, builder: RequestBuilder) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let response = builder.bearer_auth(&self.secret_key).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let envelope: DataEnvelope<R> =
                serde_json::from_slice(&body).map_err(ApiError::DeserializeFailed)?;
            Ok(envelope.data)
        } else {
            Err(Self::classify_error(status, &body))
        }
    }

    /// Classify a failed response into a more specific error type.
    fn classify_error(status: StatusCode, body: &[u8]) -> ApiError {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.joined())
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            _ => ApiError::status(status.as_u16(), message),
        }
    }
}
