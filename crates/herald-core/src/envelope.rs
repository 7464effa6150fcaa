//! Response envelope types.
//!
//! Every response body is a single top-level JSON object mapping labels to
//! values. Success responses carry domain data under labels chosen by the
//! handler (`{"movie": {...}}`); error responses carry an [`ErrorDetail`]
//! under the fixed [`ERROR_LABEL`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Label under which error details are emitted.
pub const ERROR_LABEL: &str = "error";

/// Uniform top-level JSON wrapper used for every response body.
///
/// Labels are kept in a sorted map so serialization is deterministic.
///
/// # Example
///
/// ```
/// use herald_core::Envelope;
///
/// let env = Envelope::new()
///     .with("status", "available")
///     .with("count", 3);
///
/// assert_eq!(env.len(), 2);
/// assert_eq!(env.get("status").and_then(|v| v.as_str()), Some("available"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(BTreeMap<String, Value>);

impl Envelope {
    /// Creates an empty envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label holding an already-JSON value.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(label.into(), value.into());
        self
    }

    /// Adds a label holding any serializable value.
    ///
    /// # Errors
    ///
    /// Fails when the value has no JSON representation (for example a map
    /// with non-string keys).
    pub fn try_with<T: Serialize + ?Sized>(
        mut self,
        label: impl Into<String>,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        self.0.insert(label.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Inserts or replaces a label in place.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(label.into(), value.into());
    }

    /// Returns the value stored under a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    /// Iterates over the labels in serialization order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the envelope has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Envelope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Payload carried under the `error` label.
///
/// Scalar messages are used for every plain failure status; the field map is
/// reserved for validation failures (422).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single human-readable message.
    Message(String),
    /// Field name to validation message.
    Fields(BTreeMap<String, String>),
}

impl ErrorDetail {
    /// Returns true for the field-map shape.
    #[must_use]
    pub const fn is_field_map(&self) -> bool {
        matches!(self, Self::Fields(_))
    }
}

impl From<String> for ErrorDetail {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ErrorDetail {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<BTreeMap<String, String>> for ErrorDetail {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::Fields(fields)
    }
}
