//! Client settings, with defaults and environment loading.

use std::env;
use std::time::Duration;

use crate::error::Error;

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.twitter.com";

/// Default API version prefixed to every resource path.
pub const DEFAULT_API_VERSION: &str = "1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("twitter-trends/", env!("CARGO_PKG_VERSION"));

/// Settings used to build the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL for API requests
    pub endpoint: String,
    /// API version segment (e.g. "1")
    pub api_version: String,
    /// Bearer token attached to every request, if any
    pub bearer_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            bearer_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TWITTER_ENDPOINT` - Base URL for API (optional, default: <https://api.twitter.com>)
    /// * `TWITTER_API_VERSION` - API version segment (optional, default: 1)
    /// * `TWITTER_BEARER_TOKEN` - Credentials attached to requests (optional)
    /// * `TWITTER_TIMEOUT_SECS` - Request timeout in seconds (optional, default: 30)
    /// * `TWITTER_USER_AGENT` - `User-Agent` header (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint = lookup("TWITTER_ENDPOINT").unwrap_or(defaults.endpoint);
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(Error::Configuration(format!(
                "Invalid TWITTER_ENDPOINT: {endpoint}. Must start with http:// or https://"
            )));
        }

        let api_version = lookup("TWITTER_API_VERSION").unwrap_or(defaults.api_version);

        let bearer_token = lookup("TWITTER_BEARER_TOKEN").filter(|t| !t.trim().is_empty());

        let timeout = match lookup("TWITTER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Configuration(format!("Invalid TWITTER_TIMEOUT_SECS: {raw}"))
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let user_agent = lookup("TWITTER_USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            endpoint,
            api_version,
            bearer_token,
            timeout,
            user_agent,
        })
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
