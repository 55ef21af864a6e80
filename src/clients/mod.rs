//! Resource clients for the trends SDK.

pub mod trends;

// Re-exports
pub use trends::TrendsClient;
