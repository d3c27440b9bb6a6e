use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use super::models::{ApiError, IndicatorResponse};
use tracing::{debug, warn};

/// mindicador.cl API client for economic indicator series
pub struct MindicadorClient {
    http_client: HttpClient,
    base_url: String,
}

impl MindicadorClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://mindicador.cl/api";

    /// Create a client for `base_url` with an optional request timeout
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder().default_headers(Self::create_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(base_url, http_client))
    }

    /// Create a client around an existing HTTP client (for testing)
    pub fn with_http_client(base_url: &str, http_client: HttpClient) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn indicator_url(&self, divisa: &str) -> String {
        format!("{}/{}", self.base_url, divisa)
    }

    /// Map a non-success response to an error, keeping the body for the logs
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Rate limited by mindicador.cl");
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /{divisa}
    ///
    /// Fetches the indicator and its recent series. No retries: a failed
    /// request is reported once and left to the caller.
    pub async fn get_indicator(&self, divisa: &str) -> Result<IndicatorResponse, ApiError> {
        let url = self.indicator_url(divisa);
        debug!("GET {}", url);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response body: {}", e)))?;
        debug!("Response for {}: {}", divisa, body);

        serde_json::from_str::<IndicatorResponse>(&body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
