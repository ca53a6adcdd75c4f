//! API client with retry and authentication
//!
//! Thin JSON layer over [`HttpClient`]: attaches the bearer token, maps
//! response statuses into the API error taxonomy, and handles empty-body
//! responses.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use salesdesk_domain::ApiConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the backend (e.g., "https://crm.example.com")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts,
        }
    }
}

/// Authenticated JSON client for the CRM backend
pub struct ApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client, auth, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a GET request and deserialize the JSON response
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let request = self.authorized(self.http_client.request(Method::GET, &url)).await?;

        let response = self.dispatch(request, &url, true).await?;
        Self::read_json(response).await
    }

    /// Execute a POST request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let request = self
            .authorized(self.http_client.request(Method::POST, &url))
            .await?
            .header("Content-Type", "application/json")
            .json(body);

        let response = self.dispatch(request, &url, true).await?;
        Self::read_json(response).await
    }

    /// Execute a PUT request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "PUT request");

        let request = self
            .authorized(self.http_client.request(Method::PUT, &url))
            .await?
            .header("Content-Type", "application/json")
            .json(body);

        let response = self.dispatch(request, &url, true).await?;
        Self::read_json(response).await
    }

    /// Execute a POST request with a multipart body.
    ///
    /// Multipart bodies stream and cannot be replayed, so these requests
    /// are never retried.
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST multipart request");

        let request = self
            .authorized(self.http_client.request(Method::POST, &url))
            .await?
            .multipart(form);

        let response = self.dispatch(request, &url, false).await?;
        Self::read_json(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.auth.access_token().await?;
        Ok(request.header("Authorization", format!("Bearer {token}")))
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        url: &str,
        retryable: bool,
    ) -> Result<Response, ApiError> {
        // Per-attempt timeouts live in HttpClient; the outer guard bounds
        // the whole retry sequence, so it gets one budget per attempt.
        let budget = self.config.timeout.saturating_mul(self.config.max_attempts.max(1) as u32);
        let sent = async {
            if retryable {
                self.http_client.send(request).await
            } else {
                self.http_client.send_once(request).await
            }
        };

        let response = match tokio::time::timeout(budget, sent).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::Network(err.to_string())),
            Err(_) => return Err(ApiError::Timeout(budget)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, url, body));
        }
        Ok(response)
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let status = response.status();

        // 204/205 carry no body by RFC spec
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    status.as_u16()
                ))
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Client(format!("Failed to parse response: {e}")))
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, body)
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}
