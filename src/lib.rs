//! Twitter trends SDK for Rust
//!
//! Read-only access to the Twitter trends endpoints: global top ten, current
//! top ten, and the daily and weekly trend reports.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use twitter_trends::{Options, TrendPath, TrendQuery};
//!
//! // Describe the request for the hourly trends of October 24, 2010
//! let date = NaiveDate::from_ymd_opt(2010, 10, 24).unwrap();
//! let query = TrendQuery::daily(date, Some(Options::exclude_hashtags()));
//!
//! assert_eq!(query.path(), TrendPath::Daily);
//! assert_eq!(query.params().get("date").unwrap(), "2010-10-24");
//! assert_eq!(query.params().get("exclude").unwrap(), "hashtags");
//! ```

pub mod client;
pub mod clients;
pub mod clock;
pub mod config;
pub mod error;
pub mod params;
pub mod query;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::TwitterClient;
pub use clients::TrendsClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Settings;
pub use error::{Error, TwitterError};
pub use params::{merge_params, Options, Params};
pub use query::{extract_trends, format_date, ResponseFormat, TrendPath, TrendQuery};
pub use transport::{HttpTransport, RetryConfig, Transport};
pub use types::{parse_trend_buckets, parse_trends, Trend};
