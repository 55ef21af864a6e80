//! Error types for the trends SDK.

use thiserror::Error;

/// Main error type for the trends SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport failure (connection refused, timeout, unreadable body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A successful response did not carry the expected top-level field
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    /// Twitter API error
    #[error(transparent)]
    Twitter(#[from] TwitterError),
}

/// Typed errors returned by the Twitter API.
///
/// Each variant corresponds to the HTTP status the API answered with. A
/// request for a daily or weekly report older than the retained search index
/// comes back as [`TwitterError::NotFound`], same as any other 404.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwitterError {
    /// The request was invalid (400).
    #[error("[400] {message}")]
    BadRequest { message: String },

    /// Authentication credentials were missing or incorrect (401).
    #[error("[401] {message}")]
    Unauthorized { message: String },

    /// The request was understood but refused (403).
    #[error("[403] {message}")]
    Forbidden { message: String },

    /// The resource does not exist (404).
    #[error("[404] {message}")]
    NotFound { message: String },

    /// An invalid format was specified in the request (406).
    #[error("[406] {message}")]
    NotAcceptable { message: String },

    /// The client is being rate limited by the search and trends API (420).
    #[error("[420] {message} (retry after {retry_after}s)")]
    EnhanceYourCalm { message: String, retry_after: u32 },

    /// The client exhausted its request budget (429).
    #[error("[429] {message} (retry after {retry_after}s)")]
    RateLimited { message: String, retry_after: u32 },

    /// The API failed on its side (5xx).
    #[error("[{status}] {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status.
    #[error("[{status}] {message}")]
    Other { status: u16, message: String },
}

impl TwitterError {
    /// Get the HTTP status this error was built from.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::NotAcceptable { .. } => 406,
            Self::EnhanceYourCalm { .. } => 420,
            Self::RateLimited { .. } => 429,
            Self::Server { status, .. } | Self::Other { status, .. } => *status,
        }
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::NotAcceptable { message }
            | Self::EnhanceYourCalm { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Server { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::EnhanceYourCalm { retry_after, .. } | Self::RateLimited { retry_after, .. } => {
                Some(*retry_after)
            }
            _ => None,
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::EnhanceYourCalm { .. } | Self::RateLimited { .. } | Self::Server { .. }
        )
    }

    /// Build a typed error from a status code, message and optional
    /// `Retry-After` value.
    #[must_use]
    pub fn from_status(status: u16, message: String, retry_after: Option<u32>) -> Self {
        match status {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            406 => Self::NotAcceptable { message },
            420 => Self::EnhanceYourCalm {
                message,
                retry_after: retry_after.unwrap_or(60),
            },
            429 => Self::RateLimited {
                message,
                retry_after: retry_after.unwrap_or(60),
            },
            s if (500..600).contains(&s) => Self::Server { status: s, message },
            s => Self::Other { status: s, message },
        }
    }
}
