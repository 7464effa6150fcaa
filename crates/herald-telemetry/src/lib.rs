//! Structured logging for Herald services.
//!
//! Herald logs every server fault and every background task panic as a
//! structured `tracing` event. This crate installs the subscriber that
//! renders those events, lists the fields they carry, and provides an
//! in-memory [`EventCapture`] layer for asserting on them in tests.
//!
//! | Event | Fields |
//! |-------|--------|
//! | server fault, failed error write | `http.method`, `http.uri`, `error` |
//! | background task panic | `task`, `panic` |
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_telemetry::{init_logging, LogConfig};
//!
//! let config = if cfg!(debug_assertions) {
//!     LogConfig::development()
//! } else {
//!     LogConfig::production()
//! };
//! init_logging(&config)?;
//! ```

#![doc(html_root_url = "https://docs.rs/herald-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod capture;
pub mod error;
pub mod logging;

pub use capture::{CapturedEvent, EventCapture};
pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
