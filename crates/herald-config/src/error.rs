//! Configuration errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file is missing or unreadable.
    #[error("cannot read configuration file {}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The document is not valid for its format or names unknown settings.
    #[error("malformed {format} configuration: {message}")]
    Malformed {
        /// `TOML` or `JSON`.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// Neither TOML nor JSON.
    #[error("unsupported configuration format {0:?}")]
    UnsupportedFormat(String),

    /// A setting was read but its value is unusable.
    ///
    /// `key` is the dotted setting name for file values and the variable name
    /// for environment overrides.
    #[error("bad value for {key}: {reason}")]
    BadValue {
        /// Setting or variable name.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn bad_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(format: &'static str, err: &impl std::fmt::Display) -> Self {
        Self::Malformed {
            format,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_read_error_keeps_source() {
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/herald/config.toml"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "cannot read configuration file /etc/herald/config.toml"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_bad_value_message() {
        let err = ConfigError::bad_value("limits.max_body_bytes", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "bad value for limits.max_body_bytes: must be greater than zero"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = ConfigError::malformed("JSON", &"expected `,` or `}`");
        assert_eq!(
            err.to_string(),
            "malformed JSON configuration: expected `,` or `}`"
        );
    }
}
