//! Path parameters supplied by the router.
//!
//! The router matches a route and hands the handler its named segments as
//! [`Params`]. Readers in this module turn those strings into typed values.

use crate::error::ParamError;
use smallvec::SmallVec;

/// Parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Named path parameters from a route match.
///
/// # Example
///
/// ```rust
/// use herald_extract::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("slug"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the first value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Reads the `id` path parameter as a positive integer.
///
/// # Errors
///
/// Returns [`ParamError::InvalidId`] when the parameter is missing, is not
/// a base-10 integer, or is less than 1.
///
/// # Example
///
/// ```rust
/// use herald_extract::{read_id_param, Params};
///
/// let params: Params = [("id", "17")].into_iter().collect();
/// assert_eq!(read_id_param(&params).unwrap(), 17);
/// ```
pub fn read_id_param(params: &Params) -> Result<i64, ParamError> {
    params
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id >= 1)
        .ok_or(ParamError::InvalidId)
}
