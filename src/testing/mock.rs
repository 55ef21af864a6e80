//! Mock transport for testing.
//!
//! Provides a `MockTransport` that records every request and replays
//! configured responses without touching the network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::{Error, TwitterError};
use crate::params::Params;
use crate::query::ResponseFormat;
use crate::transport::Transport;

/// Record of a request made through the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Resource path (e.g., "trends/daily")
    pub path: String,
    /// Query parameters sent with the request
    pub params: Params,
    /// Requested response format
    pub format: ResponseFormat,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(path: &str, params: Params, format: ResponseFormat) -> Self {
        Self {
            path: path.to_string(),
            params,
            format,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The body to return
    pub body: Option<Value>,
    /// API error to return instead of a body
    pub error: Option<TwitterError>,
    /// Transport failure to return instead of a body
    pub transport_error: Option<String>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            body: None,
            error: None,
            transport_error: None,
            call_count: 0,
        }
    }
}

impl MockResponse {
    /// Create a new mock response with a body.
    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    /// Create a new mock response with an API error.
    pub fn with_error(error: TwitterError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Create a new mock response with a transport failure.
    pub fn with_transport_error(message: &str) -> Self {
        Self {
            transport_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Get the result, returning either the configured body or error.
    fn get_result(&mut self) -> Result<Value, Error> {
        self.call_count += 1;
        if let Some(message) = &self.transport_error {
            return Err(Error::Http(message.clone()));
        }
        if let Some(error) = &self.error {
            return Err(Error::Twitter(error.clone()));
        }
        Ok(self.body.clone().unwrap_or_else(|| json!({ "trends": [] })))
    }
}

/// Internal state for the mock transport.
#[derive(Default)]
struct MockState {
    calls: Vec<MockCall>,
    responses: HashMap<String, MockResponse>,
}

/// Transport that records requests and replays configured responses.
///
/// Unconfigured paths answer with `{"trends": []}`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use serde_json::json;
/// use twitter_trends::testing::{MockResponse, MockTransport};
/// use twitter_trends::{TrendPath, TrendsClient};
///
/// let mock = Arc::new(MockTransport::new());
/// mock.configure(
///     TrendPath::Current,
///     MockResponse::with_body(json!({"trends": [{"name": "#rustlang"}]})),
/// );
/// let _client = TrendsClient::new(mock.clone());
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for requests to `path`.
    pub fn configure(&self, path: impl AsRef<str>, response: MockResponse) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .responses
            .insert(path.as_ref().to_string(), response);
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls.clone()
    }

    /// Get the most recent call.
    pub fn last_call(&self) -> Option<MockCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .last()
            .cloned()
    }

    /// Get the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls.len()
    }

    /// Check if `path` was requested at least once.
    pub fn was_called(&self, path: impl AsRef<str>) -> bool {
        let path = path.as_ref();
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .any(|c| c.path == path)
    }

    /// Number of times the response configured for `path` has been served.
    pub fn response_uses(&self, path: impl AsRef<str>) -> u32 {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .responses
            .get(path.as_ref())
            .map_or(0, |r| r.call_count)
    }

    /// Clear recorded calls and configured responses.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.clear();
        state.responses.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        path: &str,
        params: &Params,
        format: ResponseFormat,
    ) -> Result<Value, Error> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(MockCall::new(path, params.clone(), format));

        match state.responses.get_mut(path) {
            Some(response) => response.get_result(),
            None => MockResponse::default().get_result(),
        }
    }
}
