//! Field validation accumulator.
//!
//! A [`Validator`] collects one message per field so a handler can run every
//! check (and every query extractor) before reporting all failures at once as
//! a 422.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Accumulates field validation errors.
///
/// # Example
///
/// ```
/// use herald_core::Validator;
///
/// let mut v = Validator::new();
/// v.check(!"".is_empty(), "title", "must be provided");
/// v.check(1999 > 1888, "year", "must be greater than 1888");
///
/// assert!(!v.valid());
/// assert_eq!(v.errors().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    /// Creates an empty validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no errors were recorded.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a message for `key` unless one is already present.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Records a message for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(key, message);
        }
    }

    /// Recorded errors keyed by field.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consumes the validator, returning its errors.
    #[must_use]
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Returns true when `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// Returns true when every value is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_key_wins() {
        let mut v = Validator::new();
        v.add_error("page", "must be an integer value");
        v.add_error("page", "must be greater than zero");

        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()["page"], "must be an integer value");
    }

    #[test]
    fn test_check_only_records_failures() {
        let mut v = Validator::new();
        v.check(true, "title", "must be provided");
        assert!(v.valid());

        v.check(false, "title", "must be provided");
        assert!(!v.valid());
    }

    #[test]
    fn test_into_errors() {
        let mut v = Validator::new();
        v.add_error("sort", "invalid sort value");
        let errors = v.into_errors();
        assert_eq!(errors.get("sort").map(String::as_str), Some("invalid sort value"));
    }

    #[test]
    fn test_permitted_value() {
        let safelist = ["id", "title", "-id", "-title"];
        assert!(permitted_value(&"title", &safelist));
        assert!(!permitted_value(&"runtime", &safelist));
    }

    #[test]
    fn test_unique() {
        assert!(unique(&["drama", "comedy"]));
        assert!(!unique(&["drama", "drama"]));
        assert!(unique::<&str>(&[]));
    }
}
