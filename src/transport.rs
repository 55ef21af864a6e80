//! HTTP transport for the trends SDK.
//!
//! [`Transport`] is the seam between the resource clients and the network.
//! [`HttpTransport`] is the production implementation: it builds the request
//! URL, attaches default credentials, dispatches the request (retrying on
//! rate limiting and server errors only when a [`RetryConfig`] is supplied),
//! and translates error responses into [`TwitterError`].

use std::time::Duration;

use async_trait::async_trait;
use rand::thread_rng;
use rand::Rng;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{Error, TwitterError};
use crate::params::Params;
use crate::query::ResponseFormat;

/// Issues GET requests and returns the parsed response body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `path` with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status or an
    /// unparseable body.
    async fn get(&self, path: &str, params: &Params, format: ResponseFormat)
        -> Result<Value, Error>;
}

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![420, 429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// A configuration that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    endpoint: String,
    api_version: String,
    bearer_token: Option<String>,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// Without a `retry_config` every call sends exactly one request. Pass
    /// `Some(RetryConfig::default())` to opt into retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: &Settings, retry_config: Option<RetryConfig>) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_version: settings.api_version.trim_matches('/').to_string(),
            bearer_token: settings.bearer_token.clone(),
            client,
            retry_config: retry_config.unwrap_or_else(RetryConfig::disabled),
        })
    }

    /// Build the full URL for a resource path, e.g.
    /// `https://api.twitter.com/1/trends/daily.json`.
    #[must_use]
    pub fn url_for(&self, path: &str, format: ResponseFormat) -> String {
        format!(
            "{}/{}/{}.{}",
            self.endpoint,
            self.api_version,
            path.trim_matches('/'),
            format.extension()
        )
    }

    /// Execute a request with automatic retry on retryable errors.
    async fn execute_with_retry<F, Fut>(&self, request_fn: F) -> Result<Value, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Response, Error>>,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            match request_fn().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(status = status.as_u16(), attempt, "received response");

                    if status.is_success() {
                        let text = response
                            .text()
                            .await
                            .map_err(|e| Error::Http(format!("Failed to read response: {e}")))?;
                        return serde_json::from_str(&text).map_err(Error::from);
                    }

                    let error = Self::parse_error_response(response).await;

                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    let retry_after = match &error {
                        Error::Twitter(e) => e.retry_after(),
                        _ => None,
                    };

                    last_error = Some(error);

                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    warn!(
                        status = status.as_u16(),
                        attempt,
                        wait_secs = wait_time,
                        "retrying request"
                    );
                    tokio::time::sleep(backoff_duration(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(e);
                    }

                    let wait_time = self.get_backoff_time(attempt, None);
                    warn!(error = %e, attempt, wait_secs = wait_time, "retrying request");
                    last_error = Some(e);
                    tokio::time::sleep(backoff_duration(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Http("Request failed after maximum retries".to_string())
        }))
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra).min(self.retry_config.max_backoff);
            }
        }

        let base_wait = self
            .retry_config
            .backoff_factor
            .powi(attempt.try_into().unwrap_or(i32::MAX))
            .min(self.retry_config.max_backoff);

        let wait_time = if self.retry_config.jitter > 0.0 && base_wait > 0.0 && base_wait.is_finite()
        {
            let jitter_range = base_wait * self.retry_config.jitter;
            let mut rng = thread_rng();
            let jitter = rng.gen_range(-jitter_range..jitter_range);
            base_wait + jitter
        } else {
            base_wait
        };

        wait_time.min(self.retry_config.max_backoff).max(0.0)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(response: Response) -> Error {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        let data: Value = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
            Err(_) => Value::Null,
        };

        let message = error_message(&data).unwrap_or_else(|| format!("HTTP {status}"));

        Error::Twitter(TwitterError::from_status(status, message, retry_after))
    }

    /// Get the endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the retry configuration.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        params: &Params,
        format: ResponseFormat,
    ) -> Result<Value, Error> {
        let url = self.url_for(path, format);
        debug!(%url, params = params.len(), "dispatching GET");
        let url = url.as_str();

        self.execute_with_retry(|| async move {
            let mut request = self.client.get(url).query(params);

            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }

            request.send().await.map_err(|e| Error::Http(e.to_string()))
        })
        .await
    }
}

/// Convert a backoff in seconds into a sleep duration. Values too large for
/// a `Duration` saturate; negative or NaN values become zero.
fn backoff_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// Pull a human-readable message out of an error body.
///
/// Handles `{"error": ".."}`, `{"errors": ".."}` and
/// `{"errors": [{"message": "..", "code": ..}]}`.
fn error_message(data: &Value) -> Option<String> {
    if let Some(message) = data.get("error").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    match data.get("errors")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(errors) => errors
            .first()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 3);
        assert!((config.backoff_factor - 2.0).abs() < f64::EPSILON);
        for status in [420, 429, 500, 502, 503] {
            assert!(config.retry_on.contains(&status));
        }
    }

    #[test]
    fn test_should_retry() {
        let transport = create_test_transport(RetryConfig::default());

        assert!(transport.should_retry(429, 0));
        assert!(transport.should_retry(420, 2));
        assert!(!transport.should_retry(429, 3)); // Max retries reached

        assert!(transport.should_retry(500, 0));
        assert!(transport.should_retry(503, 0));

        assert!(!transport.should_retry(400, 0));
        assert!(!transport.should_retry(401, 0));
        assert!(!transport.should_retry(404, 0));
    }

    #[test]
    fn test_disabled_retry_never_retries() {
        let transport = create_test_transport(RetryConfig::disabled());

        assert!(!transport.should_retry(429, 0));
        assert!(!transport.should_retry(503, 0));
    }

    #[test]
    fn test_backoff_time_exponential() {
        let config = RetryConfig {
            backoff_factor: 2.0,
            jitter: 0.0,
            max_backoff: 60.0,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        assert!((transport.get_backoff_time(0, None) - 1.0).abs() < 0.01);
        assert!((transport.get_backoff_time(1, None) - 2.0).abs() < 0.01);
        assert!((transport.get_backoff_time(2, None) - 4.0).abs() < 0.01);
        assert!((transport.get_backoff_time(3, None) - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_respects_retry_after() {
        let transport = create_test_transport(RetryConfig::default());

        assert!((transport.get_backoff_time(0, Some(30)) - 30.0).abs() < 0.01);
        // Capped at max_backoff
        assert!((transport.get_backoff_time(0, Some(900)) - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_capped_at_max() {
        let config = RetryConfig {
            backoff_factor: 10.0,
            jitter: 0.0,
            max_backoff: 30.0,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        assert!((transport.get_backoff_time(3, None) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_large_attempt_is_capped_before_jitter() {
        let config = RetryConfig {
            backoff_factor: 10.0,
            jitter: 0.1,
            max_backoff: 30.0,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        // 10^400 overflows to infinity
        let wait = transport.get_backoff_time(400, None);
        assert!((27.0..=30.0).contains(&wait));
    }

    #[test]
    fn test_backoff_time_unbounded_max_does_not_panic() {
        let config = RetryConfig {
            backoff_factor: 10.0,
            jitter: 0.1,
            max_backoff: f64::INFINITY,
            ..Default::default()
        };
        let transport = create_test_transport(config);

        let wait = transport.get_backoff_time(400, None);
        assert!(wait.is_infinite());
        assert_eq!(backoff_duration(wait), Duration::MAX);
    }

    #[test]
    fn test_backoff_duration_edges() {
        assert_eq!(backoff_duration(1.5), Duration::from_millis(1500));
        assert_eq!(backoff_duration(-1.0), Duration::ZERO);
        assert_eq!(backoff_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_no_retry_config_means_no_retries() {
        let transport = HttpTransport::new(&Settings::default(), None).expect("transport");

        assert_eq!(transport.retry_config().max_retries, 0);
        assert!(!transport.should_retry(503, 0));
        assert!(!transport.should_retry(429, 0));
    }

    #[test]
    fn test_url_for() {
        let transport = create_test_transport(RetryConfig::default());

        assert_eq!(
            transport.url_for("trends", ResponseFormat::Json),
            "https://api.twitter.com/1/trends.json"
        );
        assert_eq!(
            transport.url_for("/trends/daily", ResponseFormat::Json),
            "https://api.twitter.com/1/trends/daily.json"
        );
    }

    #[test]
    fn test_url_for_trims_endpoint_slash() {
        let settings = Settings::default().with_endpoint("http://localhost:8080/");
        let transport = HttpTransport::new(&settings, None).expect("transport");

        assert_eq!(transport.endpoint(), "http://localhost:8080");
        assert_eq!(
            transport.url_for("trends/weekly", ResponseFormat::Json),
            "http://localhost:8080/1/trends/weekly.json"
        );
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(&json!({"error": "Not found", "request": "/1/trends/daily.json"})),
            Some("Not found".to_string())
        );
        assert_eq!(
            error_message(&json!({"errors": [{"message": "Rate limit exceeded", "code": 88}]})),
            Some("Rate limit exceeded".to_string())
        );
        assert_eq!(
            error_message(&json!({"errors": "Something broke"})),
            Some("Something broke".to_string())
        );
        assert_eq!(error_message(&json!({"errors": []})), None);
        assert_eq!(error_message(&Value::Null), None);
    }

    fn create_test_transport(config: RetryConfig) -> HttpTransport {
        HttpTransport::new(&Settings::default(), Some(config))
            .expect("transport creation should succeed")
    }
}
