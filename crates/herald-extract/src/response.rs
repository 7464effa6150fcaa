//! Envelope writer and error dispatcher.
//!
//! Every handler finishes with exactly one call into this module: either
//! [`write_json`] for a success envelope or one of the [`ErrorResponder`]
//! methods for a failure.
//!
//! # Format
//!
//! Bodies are pretty-printed with tab indentation and end with a single
//! newline. `Content-Type: application/json` is always set, after any extra
//! headers the caller passes, so it cannot be overridden.
//!
//! # Example
//!
//! ```rust
//! use herald_core::Envelope;
//! use herald_extract::response::write_json;
//! use http::StatusCode;
//!
//! let env = Envelope::new().with("status", "available");
//! let response = write_json(StatusCode::OK, &env, None).unwrap();
//!
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(&response.body()[..], b"{\n\t\"status\": \"available\"\n}\n");
//! ```

use crate::ExtractionContext;
use bytes::Bytes;
use herald_core::{messages, ApiError, Envelope, ErrorClass, ERROR_LABEL};
use http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode, Uri};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Serializes `data` and builds the response.
///
/// Extra headers are applied first; `Content-Type` is set last.
///
/// # Errors
///
/// Returns the serialization error when `data` has no JSON representation.
/// Nothing is built in that case, so the caller can still send a fallback.
pub fn write_json<T: Serialize + ?Sized>(
    status: StatusCode,
    data: &T,
    headers: Option<&HeaderMap>,
) -> Result<Response<Bytes>, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    buf.push(b'\n');

    let mut response = Response::new(Bytes::from(buf));
    *response.status_mut() = status;

    let out = response.headers_mut();
    if let Some(extra) = headers {
        for (name, value) in extra {
            out.append(name, value.clone());
        }
    }
    out.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(response)
}

/// A bare 500 with an empty body.
fn bare_internal_error() -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Builds error responses for one request.
///
/// Holds the method and URI so failures can be logged with request context.
///
/// # Example
///
/// ```rust
/// use herald_extract::{response::ErrorResponder, ExtractionContext};
/// use http::StatusCode;
///
/// let ctx = ExtractionContext::builder().build();
/// let response = ErrorResponder::for_context(&ctx).not_found();
///
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponder<'a> {
    method: &'a Method,
    uri: &'a Uri,
}

impl<'a> ErrorResponder<'a> {
    /// Creates a responder for the given request line.
    #[must_use]
    pub const fn new(method: &'a Method, uri: &'a Uri) -> Self {
        Self { method, uri }
    }

    /// Creates a responder for an extraction context.
    #[must_use]
    pub fn for_context(ctx: &'a ExtractionContext) -> Self {
        Self::new(ctx.method(), ctx.uri())
    }

    /// Creates a responder for a raw request.
    #[must_use]
    pub fn for_request<B>(request: &'a Request<B>) -> Self {
        Self::new(request.method(), request.uri())
    }

    /// Logs an error with the request method and URI.
    pub fn log_error(&self, err: &dyn fmt::Display) {
        tracing::error!(
            http.method = %self.method,
            http.uri = %self.request_uri(),
            error = %err,
            "request failed"
        );
    }

    fn request_uri(&self) -> &str {
        self.uri
            .path_and_query()
            .map_or_else(|| self.uri.path(), |pq| pq.as_str())
    }

    /// Sends `{"error": message}` with the given status.
    ///
    /// If the message cannot be serialized the failure is logged and a bare
    /// 500 with no body is returned instead.
    #[must_use]
    pub fn error_response<M: Serialize + ?Sized>(
        &self,
        status: StatusCode,
        message: &M,
    ) -> Response<Bytes> {
        let written = Envelope::new()
            .try_with(ERROR_LABEL, message)
            .and_then(|env| write_json(status, &env, None));

        match written {
            Ok(response) => response,
            Err(err) => {
                self.log_error(&err);
                bare_internal_error()
            }
        }
    }

    /// 500: logs `err`, then sends the canned message.
    #[must_use]
    pub fn server_error(&self, err: &dyn fmt::Display) -> Response<Bytes> {
        self.log_error(err);
        self.error_response(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
    }

    /// 404.
    #[must_use]
    pub fn not_found(&self) -> Response<Bytes> {
        self.error_response(StatusCode::NOT_FOUND, messages::NOT_FOUND)
    }

    /// 405, naming the request method.
    #[must_use]
    pub fn method_not_allowed(&self) -> Response<Bytes> {
        self.respond(&ApiError::method_not_allowed(self.method.clone()))
    }

    /// 400, echoing the error's message.
    #[must_use]
    pub fn bad_request(&self, err: &dyn fmt::Display) -> Response<Bytes> {
        self.error_response(StatusCode::BAD_REQUEST, &err.to_string())
    }

    /// 409.
    #[must_use]
    pub fn edit_conflict(&self) -> Response<Bytes> {
        self.error_response(StatusCode::CONFLICT, messages::EDIT_CONFLICT)
    }

    /// 429.
    #[must_use]
    pub fn rate_limit_exceeded(&self) -> Response<Bytes> {
        self.error_response(StatusCode::TOO_MANY_REQUESTS, messages::RATE_LIMIT_EXCEEDED)
    }

    /// 401 for a failed login.
    #[must_use]
    pub fn invalid_credentials(&self) -> Response<Bytes> {
        self.error_response(StatusCode::UNAUTHORIZED, messages::INVALID_CREDENTIALS)
    }

    /// 401 for a missing or bad token.
    #[must_use]
    pub fn invalid_authentication_token(&self) -> Response<Bytes> {
        self.error_response(StatusCode::UNAUTHORIZED, messages::INVALID_AUTHENTICATION_TOKEN)
    }

    /// 401 for an anonymous caller.
    #[must_use]
    pub fn authentication_required(&self) -> Response<Bytes> {
        self.error_response(StatusCode::UNAUTHORIZED, messages::AUTHENTICATION_REQUIRED)
    }

    /// 403 for an inactive account.
    #[must_use]
    pub fn inactive_account(&self) -> Response<Bytes> {
        self.error_response(StatusCode::FORBIDDEN, messages::INACTIVE_ACCOUNT)
    }

    /// 403 for a missing permission.
    #[must_use]
    pub fn not_permitted(&self) -> Response<Bytes> {
        self.error_response(StatusCode::FORBIDDEN, messages::NOT_PERMITTED)
    }

    /// 422 with a field-to-message map.
    #[must_use]
    pub fn failed_validation(&self, errors: &BTreeMap<String, String>) -> Response<Bytes> {
        self.error_response(StatusCode::UNPROCESSABLE_ENTITY, errors)
    }

    /// Sends the response for any [`ApiError`].
    ///
    /// Server-class errors are logged first; client-class errors are not.
    #[must_use]
    pub fn respond(&self, err: &ApiError) -> Response<Bytes> {
        if err.class() == ErrorClass::Server {
            self.log_error(err);
        }
        self.error_response(err.status_code(), &err.detail())
    }
}
