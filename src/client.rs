//! Main client.
//!
//! Owns the shared transport and hands it to the resource clients.

use std::sync::Arc;

use tracing::debug;

use crate::clients::TrendsClient;
use crate::clock::Clock;
use crate::config::Settings;
use crate::error::Error;
use crate::transport::{HttpTransport, RetryConfig, Transport};

/// Main client for interacting with the Twitter API.
///
/// # Example
///
/// ```rust,ignore
/// use twitter_trends::{Options, TwitterClient};
///
/// let client = TwitterClient::from_env()?;
///
/// let trends = client.trends().current(Some(Options::exclude_hashtags())).await?;
/// let last_week = client.trends().weekly(None, None).await?;
/// ```
pub struct TwitterClient {
    transport: Arc<dyn Transport>,
    trends: TrendsClient,
}

impl TwitterClient {
    /// Create a new client over an HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `settings` - Endpoint, credentials and timeout
    /// * `retry_config` - Configuration for retry behavior. `None` sends
    ///   exactly one request per call; pass `Some(RetryConfig::default())` to
    ///   retry rate limits and server errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(settings: &Settings, retry_config: Option<RetryConfig>) -> Result<Self, Error> {
        debug!(endpoint = %settings.endpoint, "creating client");
        let transport = Arc::new(HttpTransport::new(settings, retry_config)?);
        Ok(Self::with_transport(transport))
    }

    /// Create a client from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read. The client does
    /// not retry.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or the transport cannot be
    /// created.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(&Settings::from_env()?, None)
    }

    /// Create a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            trends: TrendsClient::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Create a client over any transport, with an explicit clock for the
    /// dated trend reports.
    pub fn with_transport_and_clock(transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        Self {
            trends: TrendsClient::with_clock(Arc::clone(&transport), clock),
            transport,
        }
    }

    /// Get the underlying transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Get the trends client.
    #[must_use]
    pub fn trends(&self) -> &TrendsClient {
        &self.trends
    }
}
