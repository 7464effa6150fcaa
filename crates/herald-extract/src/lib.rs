//! # Herald Extract
//!
//! Request readers and response writers for the Herald JSON API boundary.
//!
//! ## Readers
//!
//! | Reader | Source | Failure |
//! |--------|--------|---------|
//! | [`read_json`] | Request body | [`DecodeError`], one stable message per cause |
//! | [`read_body`] | Streaming body | [`DecodeError::TooLarge`] / [`DecodeError::Truncated`] |
//! | [`read_string`], [`read_csv`] | Query string | none, falls back to a default |
//! | [`read_int`] | Query string | recorded in a [`Validator`](herald_core::Validator) |
//! | [`read_id_param`] | Path parameters | [`ParamError`] |
//!
//! ## Writers
//!
//! [`response::write_json`] sends a success envelope and
//! [`response::ErrorResponder`] sends every failure.
//!
//! ## Example
//!
//! ```rust
//! use herald_core::{ApiError, Envelope};
//! use herald_extract::response::{write_json, ErrorResponder};
//! use herald_extract::{read_id_param, read_json, ExtractionContext};
//! use http::StatusCode;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct UpdateMovie {
//!     title: Option<String>,
//! }
//!
//! let ctx = ExtractionContext::builder()
//!     .method(http::Method::PATCH)
//!     .uri(http::Uri::from_static("/v1/movies/4"))
//!     .path_param("id", "4")
//!     .body(r#"{"title": "Casablanca"}"#)
//!     .build();
//!
//! let handle = |ctx: &ExtractionContext| -> Result<http::Response<bytes::Bytes>, ApiError> {
//!     let id = read_id_param(ctx.path_params())?;
//!     let input: UpdateMovie = read_json(ctx)?;
//!     let env = Envelope::new()
//!         .with("id", id)
//!         .with("title", input.title.unwrap_or_default());
//!     write_json(StatusCode::OK, &env, None).map_err(ApiError::internal)
//! };
//!
//! let response = handle(&ctx).unwrap_or_else(|err| ErrorResponder::for_context(&ctx).respond(&err));
//! assert_eq!(response.status(), StatusCode::OK);
//! ```

#![doc(html_root_url = "https://docs.rs/herald-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod context;
mod error;
mod json;
mod path;
mod query;
pub mod response;

pub use body::read_body;
pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use error::{DecodeError, ParamError};
pub use json::{decode_json, read_json, read_json_with_limit, MAX_BODY_BYTES};
pub use path::{read_id_param, Params};
pub use query::{read_csv, read_int, read_string, QueryParams, NOT_AN_INTEGER};
