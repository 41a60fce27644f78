//! HTTP client for the GPT Researcher backend service.
//!
//! Implements [`ResearchEngine`] over two endpoints: `POST /research`
//! gathers source material for a request, `POST /report` turns the
//! gathered material into a report. Transient failures (timeout,
//! connection, 429, 5xx) are retried with exponential backoff; everything
//! else fails immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EngineError;

use super::{ReportRequest, ResearchContext, ResearchEngine};

/// Default timeout for backend requests. A research run crawls and parses
/// many sources on the backend side, so this is deliberately generous.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Maximum retry attempts for transient failures
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Default address of a locally running backend
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client for a GPT Researcher backend.
///
/// # Example
/// ```ignore
/// let engine = GptrClient::new("http://localhost:8000")
///     .with_timeout(Duration::from_secs(120));
/// let context = engine.conduct_research(&request).await?;
/// let report = engine.write_report(&request, context).await?;
/// ```
pub struct GptrClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    timeout: Duration,
    max_retries: u32,
}

impl GptrClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            client: Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: MAX_RETRIES,
        }
    }

    /// Create from environment: `GPTR_BASE_URL` for the backend address
    /// (default `http://localhost:8000`), `GPTR_API_KEY` for bearer auth
    /// (unset means no auth header is sent).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GPTR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut client = Self::new(base_url);
        if let Ok(key) = std::env::var("GPTR_API_KEY") {
            client = client.with_api_key(key);
        }
        client
    }

    /// Set a bearer token for the backend
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom max retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// POST `body` to `path`, retrying transient failures with backoff.
    async fn post_with_retry<T, B>(&self, path: &str, body: &B) -> Result<T, EngineError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut attempt = 0;
        loop {
            match self.post_once(path, body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1));
                    warn!(attempt, path, error = %e, "backend request failed, will retry");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Execute a single HTTP request
    async fn post_once<T, B>(&self, path: &str, body: &B) -> Result<T, EngineError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(body);

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else if e.is_connect() {
                EngineError::Connection(e.to_string())
            } else {
                EngineError::Network(e.to_string())
            }
        })?;

        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| EngineError::Parse(e.to_string()));
        }

        let error_text = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(EngineError::Unauthorized),
            429 => Err(EngineError::RateLimited),
            400 => Err(EngineError::BadRequest(error_text)),
            500..=599 => Err(EngineError::Server(status.as_u16(), error_text)),
            _ => Err(EngineError::Http(status.as_u16(), error_text)),
        }
    }
}

/// Request body shared by both endpoints' request side.
#[derive(Debug, Serialize)]
struct ResearchBody<'a> {
    query: &'a str,
    report_type: &'a str,
    report_source: &'a str,
}

impl<'a> ResearchBody<'a> {
    fn from_request(request: &'a ReportRequest) -> Self {
        Self {
            query: &request.query,
            report_type: request.report_type.as_str(),
            report_source: request.report_source.as_str(),
        }
    }
}

/// Response from `POST /research`
#[derive(Debug, Deserialize)]
struct ResearchResponse {
    /// Gathered source material, passed back verbatim to `POST /report`
    context: serde_json::Value,
}

/// Request body for `POST /report`
#[derive(Debug, Serialize)]
struct ReportBody<'a> {
    query: &'a str,
    report_type: &'a str,
    report_source: &'a str,
    context: serde_json::Value,
}

/// Response from `POST /report`
#[derive(Debug, Deserialize)]
struct ReportResponse {
    report: String,
}

#[async_trait]
impl ResearchEngine for GptrClient {
    async fn conduct_research(
        &self,
        request: &ReportRequest,
    ) -> Result<ResearchContext, EngineError> {
        debug!(
            query = %request.query,
            source = request.report_source.as_str(),
            "conducting research"
        );

        let body = ResearchBody::from_request(request);
        let response: ResearchResponse = self.post_with_retry("/research", &body).await?;

        Ok(ResearchContext::new(response.context))
    }

    async fn write_report(
        &self,
        request: &ReportRequest,
        context: ResearchContext,
    ) -> Result<String, EngineError> {
        debug!(
            query = %request.query,
            report_type = request.report_type.as_str(),
            "writing report"
        );

        let body = ReportBody {
            query: &request.query,
            report_type: request.report_type.as_str(),
            report_source: request.report_source.as_str(),
            context: context.into_inner(),
        };
        let response: ReportResponse = self.post_with_retry("/report", &body).await?;

        Ok(response.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ReportSource, ReportType};

    #[test]
    fn test_builder_pattern() {
        let client = GptrClient::new("http://example.com")
            .with_api_key("test-key")
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(5);

        assert_eq!(client.base_url, "http://example.com");
        assert_eq!(client.api_key.as_deref(), Some("test-key"));
        assert_eq!(client.timeout, Duration::from_secs(60));
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = GptrClient::new("http://example.com/");
        assert_eq!(client.base_url, "http://example.com");
    }

    #[test]
    fn test_research_body_serialization() {
        let request = ReportRequest {
            query: "What is Rust?".to_string(),
            report_type: ReportType::Outline,
            report_source: ReportSource::Web,
        };
        let body = ResearchBody::from_request(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["query"], "What is Rust?");
        assert_eq!(json["report_type"], "outline_report");
        assert_eq!(json["report_source"], "web");
    }

    #[test]
    fn test_report_body_carries_context() {
        let body = ReportBody {
            query: "q",
            report_type: "research_report",
            report_source: "local",
            context: serde_json::json!({"sources": ["doc1.pdf"]}),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["context"]["sources"][0], "doc1.pdf");
        assert_eq!(json["report_source"], "local");
    }
}
