//! Data model types for the trends SDK.

pub mod trends;

// Re-exports
pub use trends::{parse_trend_buckets, parse_trends, Trend};
