//! # Herald
//!
//! The request/response boundary of a JSON HTTP API.
//!
//! Herald turns raw requests into typed input, turns results into a uniform
//! JSON envelope, classifies every failure into a fixed catalog, and
//! supervises fire-and-forget background work.
//!
//! | Crate | Provides |
//! |-------|----------|
//! | [`core`] | envelopes, the error catalog, principals, the validator |
//! | [`extract`] | strict JSON decoding, query and path readers, response writers |
//! | [`tasks`] | the background task supervisor |
//! | [`telemetry`] | structured logging setup |
//! | [`config`] | layered configuration |
//!
//! # Example
//!
//! ```rust
//! use herald::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CreateMovie {
//!     title: String,
//!     year: i32,
//! }
//!
//! fn create_movie(ctx: &ExtractionContext) -> ApiResult<http::Response<bytes::Bytes>> {
//!     let input: CreateMovie = read_json(ctx)?;
//!
//!     let mut v = Validator::new();
//!     v.check(!input.title.is_empty(), "title", "must be provided");
//!     v.check(input.year >= 1888, "year", "must be greater than 1888");
//!     if !v.valid() {
//!         return Err(ApiError::failed_validation(v.into_errors()));
//!     }
//!
//!     let env = Envelope::new().with("title", input.title).with("year", input.year);
//!     write_json(http::StatusCode::CREATED, &env, None).map_err(ApiError::internal)
//! }
//!
//! let ctx = ExtractionContext::builder()
//!     .method(http::Method::POST)
//!     .body(r#"{"title": "Metropolis", "year": 1927}"#)
//!     .build();
//!
//! let response = create_movie(&ctx)
//!     .unwrap_or_else(|err| ErrorResponder::for_context(&ctx).respond(&err));
//! assert_eq!(response.status(), http::StatusCode::CREATED);
//! ```

#![doc(html_root_url = "https://docs.rs/herald/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use herald_core as core;

// Re-export extraction and response types
pub use herald_extract as extract;

// Re-export background task types
pub use herald_tasks as tasks;

// Re-export logging setup
pub use herald_telemetry as telemetry;

// Re-export configuration
pub use herald_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use herald::prelude::*;
///
/// let v = Validator::new();
/// assert!(v.valid());
/// ```
pub mod prelude {
    pub use herald_core::context::{attach, retrieve};
    pub use herald_core::{
        ApiError, ApiResult, Envelope, ErrorDetail, Principal, UserIdentity, Validator,
    };

    // Readers
    pub use herald_extract::{
        read_body, read_csv, read_id_param, read_int, read_json, read_json_with_limit,
        read_string, DecodeError, ExtractionContext, Params, QueryParams,
    };

    // Writers
    pub use herald_extract::response::{write_json, ErrorResponder};

    // Background tasks
    pub use herald_tasks::Supervisor;

    // Configuration and logging
    pub use herald_config::{ConfigLoader, HeraldConfig};
    pub use herald_telemetry::{init_logging, LogConfig};
}
