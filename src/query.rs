//! Request descriptors for the trends endpoints.
//!
//! A [`TrendQuery`] is the full description of one trends request: which
//! resource to hit, which query parameters to send and which response format
//! to expect. It is built per call, handed to a [`Transport`] and dropped once
//! the `trends` field has been pulled out of the response.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::error::Error;
use crate::params::{merge_params, Options, Params, DATE_PARAM};
use crate::transport::Transport;

/// Top-level response field holding the trend records.
pub const TRENDS_FIELD: &str = "trends";

/// The fixed resource paths of the trends API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendPath {
    /// Top ten globally trending topics.
    Global,
    /// Current top ten trending topics.
    Current,
    /// Top 20 trending topics for each hour of a day.
    Daily,
    /// Top 30 trending topics for each day of a week.
    Weekly,
}

impl TrendPath {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "trends",
            Self::Current => "trends/current",
            Self::Daily => "trends/daily",
            Self::Weekly => "trends/weekly",
        }
    }
}

impl AsRef<str> for TrendPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TrendPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body format requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
}

impl ResponseFormat {
    /// Extension appended to the resource path.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

/// Format a report date the way the API expects it (`YYYY-MM-DD`).
///
/// Years past 9999 are written without a sign, e.g. `10000-01-02`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// One trends request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendQuery {
    path: TrendPath,
    params: Params,
    format: ResponseFormat,
}

impl TrendQuery {
    /// Request for the top ten globally trending topics.
    #[must_use]
    pub fn global(options: Option<Options>) -> Self {
        Self::undated(TrendPath::Global, options)
    }

    /// Request for the current top ten trending topics.
    #[must_use]
    pub fn current(options: Option<Options>) -> Self {
        Self::undated(TrendPath::Current, options)
    }

    /// Request for the hourly trends of `date`.
    #[must_use]
    pub fn daily(date: NaiveDate, options: Option<Options>) -> Self {
        Self::dated(TrendPath::Daily, date, options)
    }

    /// Request for the daily trends of the week starting at `date`.
    #[must_use]
    pub fn weekly(date: NaiveDate, options: Option<Options>) -> Self {
        Self::dated(TrendPath::Weekly, date, options)
    }

    fn undated(path: TrendPath, options: Option<Options>) -> Self {
        Self {
            path,
            params: options.unwrap_or_default().into_params(),
            format: ResponseFormat::Json,
        }
    }

    // The derived date replaces any `date` the caller put in the options.
    fn dated(path: TrendPath, date: NaiveDate, options: Option<Options>) -> Self {
        let derived = Params::from([(DATE_PARAM.to_string(), format_date(date))]);
        let base = options.unwrap_or_default();

        Self {
            path,
            params: merge_params(base.as_params(), &derived),
            format: ResponseFormat::Json,
        }
    }

    #[must_use]
    pub fn path(&self) -> TrendPath {
        self.path
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Dispatch the request and return the `trends` field of the response.
    ///
    /// # Errors
    ///
    /// Transport errors are returned unchanged. A response without a
    /// `trends` field yields [`Error::MissingField`].
    pub async fn send(&self, transport: &dyn Transport) -> Result<Value, Error> {
        let body = transport
            .get(self.path.as_str(), &self.params, self.format)
            .await?;

        extract_trends(body)
    }
}

/// Take the `trends` field out of a response body.
///
/// # Errors
///
/// Returns [`Error::MissingField`] when the body is not an object or has no
/// `trends` key.
pub fn extract_trends(mut body: Value) -> Result<Value, Error> {
    body.get_mut(TRENDS_FIELD)
        .map(Value::take)
        .ok_or(Error::MissingField(TRENDS_FIELD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_paths() {
        assert_eq!(TrendPath::Global.as_str(), "trends");
        assert_eq!(TrendPath::Current.as_str(), "trends/current");
        assert_eq!(TrendPath::Daily.as_str(), "trends/daily");
        assert_eq!(TrendPath::Weekly.to_string(), "trends/weekly");
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(date(2010, 10, 24)), "2010-10-24");
        assert_eq!(format_date(date(2011, 1, 5)), "2011-01-05");
        assert_eq!(format_date(date(987, 6, 7)), "0987-06-07");
    }

    #[test]
    fn test_format_date_five_digit_year_has_no_sign() {
        assert_eq!(format_date(date(10000, 1, 2)), "10000-01-02");
    }

    #[test]
    fn test_global_passes_options_unchanged() {
        let options = Options::new().with("exclude", "hashtags").with("lang", "en");
        let query = TrendQuery::global(Some(options.clone()));

        assert_eq!(query.path(), TrendPath::Global);
        assert_eq!(query.params(), options.as_params());
        assert_eq!(query.format(), ResponseFormat::Json);
    }

    #[test]
    fn test_current_without_options_has_no_params() {
        let query = TrendQuery::current(None);

        assert_eq!(query.path(), TrendPath::Current);
        assert!(query.params().is_empty());
    }

    #[test]
    fn test_daily_injects_date() {
        let query = TrendQuery::daily(date(2010, 10, 24), Some(Options::exclude_hashtags()));

        assert_eq!(query.path(), TrendPath::Daily);
        assert_eq!(query.params().get("date").map(String::as_str), Some("2010-10-24"));
        assert_eq!(query.params().get("exclude").map(String::as_str), Some("hashtags"));
    }

    #[test]
    fn test_weekly_date_overrides_option() {
        let options = Options::new().with("date", "1999-01-01");
        let query = TrendQuery::weekly(date(2010, 10, 24), Some(options));

        assert_eq!(query.path(), TrendPath::Weekly);
        assert_eq!(query.params().get("date").map(String::as_str), Some("2010-10-24"));
        assert_eq!(query.params().len(), 1);
    }

    #[test]
    fn test_extract_trends_returns_field_verbatim() {
        let body = json!({"as_of": 1288029444, "trends": [{"name": "#test"}]});
        let trends = extract_trends(body).expect("trends present");

        assert_eq!(trends, json!([{"name": "#test"}]));
    }

    #[test]
    fn test_extract_trends_keeps_null() {
        let trends = extract_trends(json!({"trends": null})).expect("key present");
        assert_eq!(trends, Value::Null);
    }

    #[test]
    fn test_extract_trends_missing_key() {
        let result = extract_trends(json!({"as_of": 1288029444}));
        assert!(matches!(result, Err(Error::MissingField("trends"))));
    }

    #[test]
    fn test_extract_trends_non_object_body() {
        let result = extract_trends(json!([1, 2, 3]));
        assert!(matches!(result, Err(Error::MissingField("trends"))));
    }
}
