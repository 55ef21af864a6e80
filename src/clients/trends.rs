//! Trends resource client.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::params::Options;
use crate::query::TrendQuery;
use crate::transport::Transport;

/// Client for the global, current, daily and weekly trends endpoints.
///
/// None of these endpoints require authentication, though the transport
/// may still attach its default credentials. Every call issues exactly one
/// GET request and returns whatever the API stored under `trends`.
pub struct TrendsClient {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl TrendsClient {
    /// Create a new trends client reading "today" from the system clock.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_clock(transport, Arc::new(SystemClock))
    }

    /// Create a new trends client with an explicit clock.
    pub fn with_clock(transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Get the top ten topics that are currently trending on Twitter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// `trends` field.
    pub async fn trends(&self, options: Option<Options>) -> Result<Value, Error> {
        debug!("fetching global trends");
        self.global_query(options).send(self.transport.as_ref()).await
    }

    /// Get the current top 10 trending topics on Twitter.
    ///
    /// Pass [`Options::exclude_hashtags`] to remove all hashtags from the
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// `trends` field.
    pub async fn current(&self, options: Option<Options>) -> Result<Value, Error> {
        debug!("fetching current trends");
        self.current_query(options).send(self.transport.as_ref()).await
    }

    /// Get the top 20 trending topics for each hour in a given day.
    ///
    /// # Arguments
    ///
    /// * `date` - The start date for the report (default: today). Dates older
    ///   than the available search index (7-10 days) come back as a 404;
    ///   dates in the future are clamped to today by the API.
    /// * `options` - Extra query parameters. A `date` entry is overridden by
    ///   the `date` argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// `trends` field.
    pub async fn daily(
        &self,
        date: Option<NaiveDate>,
        options: Option<Options>,
    ) -> Result<Value, Error> {
        let query = self.daily_query(date, options);
        debug!(params = ?query.params(), "fetching daily trends");
        query.send(self.transport.as_ref()).await
    }

    /// Get the top 30 trending topics for each day in a given week.
    ///
    /// Arguments and date handling are the same as [`TrendsClient::daily`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// `trends` field.
    pub async fn weekly(
        &self,
        date: Option<NaiveDate>,
        options: Option<Options>,
    ) -> Result<Value, Error> {
        let query = self.weekly_query(date, options);
        debug!(params = ?query.params(), "fetching weekly trends");
        query.send(self.transport.as_ref()).await
    }

    /// Build the request [`TrendsClient::trends`] would send.
    #[must_use]
    pub fn global_query(&self, options: Option<Options>) -> TrendQuery {
        TrendQuery::global(options)
    }

    /// Build the request [`TrendsClient::current`] would send.
    #[must_use]
    pub fn current_query(&self, options: Option<Options>) -> TrendQuery {
        TrendQuery::current(options)
    }

    /// Build the request [`TrendsClient::daily`] would send, resolving a
    /// missing date against the clock now.
    #[must_use]
    pub fn daily_query(&self, date: Option<NaiveDate>, options: Option<Options>) -> TrendQuery {
        let date = date.unwrap_or_else(|| self.clock.today());
        TrendQuery::daily(date, options)
    }

    /// Build the request [`TrendsClient::weekly`] would send, resolving a
    /// missing date against the clock now.
    #[must_use]
    pub fn weekly_query(&self, date: Option<NaiveDate>, options: Option<Options>) -> TrendQuery {
        let date = date.unwrap_or_else(|| self.clock.today());
        TrendQuery::weekly(date, options)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::Duration;
    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::query::TrendPath;
    use crate::testing::{MockResponse, MockTransport};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn client_with(mock: &Arc<MockTransport>, today: NaiveDate) -> TrendsClient {
        TrendsClient::with_clock(mock.clone(), Arc::new(FixedClock(today)))
    }

    #[tokio::test]
    async fn test_trends_returns_trends_field() {
        let mock = Arc::new(MockTransport::new());
        mock.configure(
            TrendPath::Global,
            MockResponse::with_body(json!({"trends": [{"name": "#test"}]})),
        );
        let client = client_with(&mock, date(2010, 10, 24));

        let trends = client.trends(None).await.expect("trends");

        assert_eq!(trends, json!([{"name": "#test"}]));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_daily_defaults_to_clock_date() {
        let mock = Arc::new(MockTransport::new());
        let client = client_with(&mock, date(2010, 10, 24));

        client.daily(None, None).await.expect("daily");

        let call = mock.last_call().expect("one call");
        assert_eq!(call.path, "trends/daily");
        assert_eq!(call.params.get("date").map(String::as_str), Some("2010-10-24"));
    }

    /// Clock whose date moves forward when told to.
    struct AdvancingClock {
        start: NaiveDate,
        offset_days: AtomicI64,
    }

    impl AdvancingClock {
        fn advance(&self, days: i64) {
            self.offset_days.fetch_add(days, Ordering::SeqCst);
        }
    }

    impl Clock for AdvancingClock {
        fn today(&self) -> NaiveDate {
            self.start + Duration::days(self.offset_days.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn test_today_is_read_on_every_call() {
        let mock = Arc::new(MockTransport::new());
        let clock = Arc::new(AdvancingClock {
            start: date(2010, 10, 24),
            offset_days: AtomicI64::new(0),
        });
        let client = TrendsClient::with_clock(mock.clone(), clock.clone());

        client.daily(None, None).await.expect("first daily");
        clock.advance(1);
        client.daily(None, None).await.expect("second daily");
        clock.advance(6);
        client.weekly(None, None).await.expect("weekly");

        let dates: Vec<String> = mock
            .calls()
            .into_iter()
            .map(|c| c.params.get("date").cloned().expect("date param"))
            .collect();
        assert_eq!(dates, ["2010-10-24", "2010-10-25", "2010-10-31"]);
    }

    #[test]
    fn test_query_builders_use_clock_date() {
        let mock = Arc::new(MockTransport::new());
        let client = client_with(&mock, date(2011, 3, 1));

        let query = client.weekly_query(None, None);

        assert_eq!(query.path(), TrendPath::Weekly);
        assert_eq!(query.params().get("date").map(String::as_str), Some("2011-03-01"));
        assert_eq!(mock.call_count(), 0);
    }
}
