//! Failure catalog for handler-facing error responses.
//!
//! [`ApiError`] enumerates every failure a handler can report. Each variant
//! binds one HTTP status and one [`ErrorDetail`]; the response layer turns it
//! into a `{"error": ...}` envelope.
//!
//! | Variant | Status | Detail |
//! |---|---|---|
//! | `Internal` | 500 | canned message, source logged |
//! | `NotFound` | 404 | canned message |
//! | `MethodNotAllowed` | 405 | names the method |
//! | `BadRequest` | 400 | echoes the triggering message |
//! | `EditConflict` | 409 | canned message |
//! | `RateLimitExceeded` | 429 | canned message |
//! | `InvalidCredentials` | 401 | canned message |
//! | `InvalidAuthenticationToken` | 401 | canned message |
//! | `AuthenticationRequired` | 401 | canned message |
//! | `InactiveAccount` | 403 | canned message |
//! | `NotPermitted` | 403 | canned message |
//! | `FailedValidation` | 422 | field map |

use crate::envelope::ErrorDetail;
use http::{Method, StatusCode};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Canned client-facing messages.
pub mod messages {
    /// 500 response body. Never carries internal detail.
    pub const INTERNAL: &str =
        "the server encountered a problem and could not process your request";
    /// 404 response body.
    pub const NOT_FOUND: &str = "the requested resource could not be found";
    /// 409 response body.
    pub const EDIT_CONFLICT: &str =
        "unable to update the record due to an edit conflict, please try again";
    /// 429 response body.
    pub const RATE_LIMIT_EXCEEDED: &str = "rate limit exceeded";
    /// 401 response body for a failed login.
    pub const INVALID_CREDENTIALS: &str = "invalid authentication credentials";
    /// 401 response body for a bad bearer token.
    pub const INVALID_AUTHENTICATION_TOKEN: &str = "invalid or missing authentication token";
    /// 401 response body for anonymous access to a protected route.
    pub const AUTHENTICATION_REQUIRED: &str = "you must be authenticated to access this resource";
    /// 403 response body for a not-yet-activated account.
    pub const INACTIVE_ACCOUNT: &str =
        "your user account must be activated to access this resource";
    /// 403 response body for a missing permission.
    pub const NOT_PERMITTED: &str =
        "your user account doesn't have the necessary permissions to access this resource";
}

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Caused by the request; reported with a 4xx status, never logged as a server error.
    Client,
    /// Unexpected fault; logged with request context, reported as an opaque 500.
    Server,
}

/// A handler-facing failure.
///
/// # Example
///
/// ```
/// use herald_core::ApiError;
/// use http::StatusCode;
///
/// let err = ApiError::bad_request("invalid id parameter");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.to_string(), "invalid id parameter");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unexpected server fault.
    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),

    /// No resource matches the request.
    #[error("{}", messages::NOT_FOUND)]
    NotFound,

    /// The matched route does not support the request method.
    #[error("the {method} method is not supported for this resource")]
    MethodNotAllowed {
        /// Method the client used.
        method: Method,
    },

    /// Malformed client input.
    #[error("{0}")]
    BadRequest(String),

    /// Optimistic-concurrency conflict.
    #[error("{}", messages::EDIT_CONFLICT)]
    EditConflict,

    /// Caller exceeded its request budget.
    #[error("{}", messages::RATE_LIMIT_EXCEEDED)]
    RateLimitExceeded,

    /// Login credentials did not match.
    #[error("{}", messages::INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// Bearer token missing, malformed, or expired.
    #[error("{}", messages::INVALID_AUTHENTICATION_TOKEN)]
    InvalidAuthenticationToken,

    /// Anonymous caller on a route that needs a principal.
    #[error("{}", messages::AUTHENTICATION_REQUIRED)]
    AuthenticationRequired,

    /// Principal exists but the account is not activated.
    #[error("{}", messages::INACTIVE_ACCOUNT)]
    InactiveAccount,

    /// Principal lacks the permission the route requires.
    #[error("{}", messages::NOT_PERMITTED)]
    NotPermitted,

    /// One or more fields failed validation.
    #[error("validation failed for {} field(s)", .0.len())]
    FailedValidation(BTreeMap<String, String>),
}

impl ApiError {
    /// Wraps any error as a server fault.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::Internal(source.into())
    }

    /// Creates a 400 echoing the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates a 405 naming the offending method.
    #[must_use]
    pub fn method_not_allowed(method: Method) -> Self {
        Self::MethodNotAllowed { method }
    }

    /// Creates a 422 from a field map.
    #[must_use]
    pub fn failed_validation(errors: BTreeMap<String, String>) -> Self {
        Self::FailedValidation(errors)
    }

    /// Returns the HTTP status for this failure.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::EditConflict => StatusCode::CONFLICT,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidCredentials
            | Self::InvalidAuthenticationToken
            | Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::InactiveAccount | Self::NotPermitted => StatusCode::FORBIDDEN,
            Self::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns the failure class.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Internal(_) => ErrorClass::Server,
            _ => ErrorClass::Client,
        }
    }

    /// Returns the client-facing detail.
    ///
    /// Server faults always yield the canned 500 message so internal
    /// detail never reaches the client.
    #[must_use]
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::Internal(_) => ErrorDetail::Message(messages::INTERNAL.to_string()),
            Self::FailedValidation(fields) => ErrorDetail::Fields(fields.clone()),
            other => ErrorDetail::Message(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
