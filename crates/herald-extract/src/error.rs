//! Extraction error types.
//!
//! Each [`DecodeError`] variant renders one stable, client-safe message. The
//! low-level parser text never reaches the client; only positions and field
//! names are carried over.

use herald_core::ApiError;
use thiserror::Error;

/// A classified reason a request body could not be decoded.
///
/// # Example
///
/// ```rust
/// use herald_extract::DecodeError;
///
/// let err = DecodeError::TooLarge { limit: 1_048_576 };
/// assert_eq!(err.to_string(), "body must not be larger than 1048576 bytes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Malformed JSON syntax.
    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax {
        /// Byte offset of the failure.
        offset: usize,
    },

    /// Input ended in the middle of a value.
    #[error("body contains badly-formed JSON")]
    Truncated,

    /// A known field holds a value of the wrong JSON type.
    #[error("body contains incorrect JSON type for field {field:?}")]
    FieldType {
        /// Dotted path of the field.
        field: String,
    },

    /// A value of the wrong JSON type outside any named field.
    #[error("body contains incorrect JSON type (at character {offset})")]
    Type {
        /// Byte offset of the failure.
        offset: usize,
    },

    /// Body is empty or whitespace only.
    #[error("body must not be empty")]
    Empty,

    /// Body names a key the destination does not accept.
    #[error("body contains unknown key {key:?}")]
    UnknownField {
        /// Dotted path of the key.
        key: String,
    },

    /// Body exceeds the byte ceiling.
    #[error("body must not be larger than {limit} bytes")]
    TooLarge {
        /// Ceiling in bytes.
        limit: usize,
    },

    /// More than one top-level value.
    #[error("body must only contain a single JSON value")]
    MultipleValues,

    /// The same key appears twice in one object.
    #[error("body contains duplicate key {key:?}")]
    DuplicateKey {
        /// Dotted path of the key.
        key: String,
    },

    /// A field the destination requires is absent.
    #[error("body is missing required field {field:?}")]
    MissingField {
        /// Dotted path of the field.
        field: String,
    },

    /// Well-formed JSON the destination rejects for another reason.
    #[error("body contains invalid JSON value")]
    Invalid,
}

/// Path parameter failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The `id` parameter is missing, non-numeric, or below 1.
    #[error("invalid id parameter")]
    InvalidId,
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}
