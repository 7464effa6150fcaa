//! Query string readers.
//!
//! The readers never fail. The string and list readers fall back to a default
//! when the key is missing or blank. [`read_int`] does the same, and on a bad
//! value it also records a message in a caller-supplied [`Validator`], so one
//! request can report every bad parameter at once.
//!
//! ```rust
//! use herald_core::Validator;
//! use herald_extract::{read_csv, read_int, read_string, QueryParams};
//!
//! let qs = QueryParams::parse("title=moana&genres=animation,adventure&page=abc");
//! let mut v = Validator::new();
//!
//! let title = read_string(&qs, "title", "");
//! let genres = read_csv(&qs, "genres", Vec::new());
//! let page = read_int(&qs, "page", 1, &mut v);
//! let page_size = read_int(&qs, "page_size", 20, &mut v);
//!
//! assert_eq!(title, "moana");
//! assert_eq!(genres, vec!["animation", "adventure"]);
//! assert_eq!((page, page_size), (1, 20));
//! assert_eq!(v.errors()["page"], "must be an integer value");
//! ```

use crate::ExtractionContext;
use herald_core::Validator;

/// Message recorded by [`read_int`] for a non-integer value.
pub const NOT_AN_INTEGER: &str = "must be an integer value";

/// Decoded query parameters in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Percent-escapes and `+` are decoded, and bytes that are not valid
    /// UTF-8 become U+FFFD. A string that cannot be decoded at all yields no
    /// pairs.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default();
        Self { pairs }
    }

    /// Parses the query string of the request.
    #[must_use]
    pub fn from_context(ctx: &ExtractionContext) -> Self {
        ctx.query_string().map(Self::parse).unwrap_or_default()
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

/// Returns the value of `key`, or `default` when it is missing or empty.
#[must_use]
pub fn read_string(qs: &QueryParams, key: &str, default: &str) -> String {
    qs.non_empty(key).unwrap_or(default).to_string()
}

/// Splits the value of `key` on commas, or returns `default` when it is
/// missing or empty.
#[must_use]
pub fn read_csv(qs: &QueryParams, key: &str, default: Vec<String>) -> Vec<String> {
    match qs.non_empty(key) {
        Some(csv) => csv.split(',').map(str::to_string).collect(),
        None => default,
    }
}

/// Parses the value of `key` as a base-10 integer.
///
/// Returns `default` when the key is missing or empty. When the value does
/// not parse, [`NOT_AN_INTEGER`] is recorded under `key` in `v` and
/// `default` is returned; check [`Validator::valid`] after reading every
/// parameter.
pub fn read_int(qs: &QueryParams, key: &str, default: i64, v: &mut Validator) -> i64 {
    let Some(raw) = qs.non_empty(key) else {
        return default;
    };

    raw.parse().unwrap_or_else(|_| {
        v.add_error(key, NOT_AN_INTEGER);
        default
    })
}
