//! Typed views over trend records.
//!
//! The trends operations return raw JSON. These types are an opt-in way to
//! read the common fields; unknown fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// A trending topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Topic name, e.g. "#rustlang"
    pub name: String,
    /// Search query for the topic
    #[serde(default)]
    pub query: Option<String>,
    /// Search URL for the topic
    #[serde(default)]
    pub url: Option<String>,
    /// Promotion marker, null for organic trends
    #[serde(default)]
    pub promoted_content: Option<Value>,
    /// Events attached to the topic
    #[serde(default)]
    pub events: Option<Value>,
}

impl Trend {
    /// Whether the topic is a promoted trend.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        match &self.promoted_content {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(_) => true,
        }
    }
}

/// Parse a top-ten trends list (the value returned by `trends` and
/// `current`).
///
/// # Errors
///
/// Returns an error if the value is not an array of trend records.
pub fn parse_trends(value: &Value) -> Result<Vec<Trend>, Error> {
    Vec::<Trend>::deserialize(value).map_err(Error::from)
}

/// Parse a dated trends report (the value returned by `daily` and `weekly`),
/// keyed by the hour or day each bucket covers.
///
/// # Errors
///
/// Returns an error if the value is not an object of trend record arrays.
pub fn parse_trend_buckets(value: &Value) -> Result<BTreeMap<String, Vec<Trend>>, Error> {
    BTreeMap::<String, Vec<Trend>>::deserialize(value).map_err(Error::from)
}
