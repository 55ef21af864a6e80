//! Query parameters and caller-supplied options.

use std::collections::BTreeMap;

/// Query parameters sent with a request, ordered by name.
pub type Params = BTreeMap<String, String>;

/// Query parameter carrying the report date for daily and weekly trends.
pub const DATE_PARAM: &str = "date";

/// Query parameter used to filter hashtags out of a trends list.
pub const EXCLUDE_PARAM: &str = "exclude";

/// Merge two parameter maps. Keys present in `overrides` always win.
#[must_use]
pub fn merge_params(base: &Params, overrides: &Params) -> Params {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Caller-supplied options for a trends request.
///
/// Values are stringified when inserted, so any scalar with a `Display`
/// implementation can be passed.
///
/// ```rust
/// use twitter_trends::Options;
///
/// let options = Options::new().with("exclude", "hashtags").with("count", 10);
/// assert_eq!(options.get("count"), Some("10"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Params);

impl Options {
    /// Create an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that remove all hashtags from the trends list.
    #[must_use]
    pub fn exclude_hashtags() -> Self {
        Self::new().with(EXCLUDE_PARAM, "hashtags")
    }

    /// Add an option, consuming and returning `self`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an option, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    /// Look up an option by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the options as query parameters.
    #[must_use]
    pub fn as_params(&self) -> &Params {
        &self.0
    }

    /// Convert the options into query parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.0
    }
}

impl From<Params> for Options {
    fn from(params: Params) -> Self {
        Self(params)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}
