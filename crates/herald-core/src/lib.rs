//! # Herald Core
//!
//! Core types for the Herald JSON API boundary layer.
//!
//! - [`Envelope`] / [`ErrorDetail`] - the uniform response body shapes
//! - [`ApiError`] - the fixed failure catalog and its status mapping
//! - [`Principal`] and [`context`] - request-scoped caller identity
//! - [`Validator`] - field error accumulator used by query extractors and handlers

#![doc(html_root_url = "https://docs.rs/herald-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
mod envelope;
mod error;
mod identity;
mod validator;

pub use context::ScopedCarrier;
pub use envelope::{Envelope, ErrorDetail, ERROR_LABEL};
pub use error::{messages, ApiError, ApiResult, ErrorClass};
pub use identity::{Principal, UserIdentity};
pub use validator::{permitted_value, unique, Validator};
