//! Typed configuration for Herald services.
//!
//! - TOML and JSON configuration files
//! - `.env` files and environment variable overrides
//! - Strict parsing (unknown fields are errors)
//! - Layered loading (defaults → file → env) followed by validation
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! port = 4000
//! env = "production"
//! shutdown_timeout_secs = 30
//!
//! [limits]
//! max_body_bytes = 1048576
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! With prefix `HERALD`:
//!
//! - `HERALD__SERVER__PORT=8080`
//! - `HERALD__SERVER__ENV=staging`
//! - `HERALD__LIMITS__MAX_BODY_BYTES=2097152`
//! - `HERALD__LOGGING__FORMAT=pretty`
//!
//! # Example
//!
//! ```no_run
//! use herald_config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("herald.toml")?
//!     .with_env_prefix("HERALD")
//!     .load()?;
//!
//! herald_telemetry::init_logging(&config.log_config())?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/herald-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::HeraldConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{Environment, LimitsConfig, LoggingConfig, ServerConfig};
