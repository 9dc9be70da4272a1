//! Error types produced while building adapters and the global facade.
//!
//! Only construction can fail. Lookups never return errors: a missing or
//! malformed value simply does not match and the caller's default wins.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a configuration document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CfgsynthError {
    /// The document file could not be read.
    #[error("failed to read configuration document '{}': {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document bytes were not valid UTF-8.
    #[error("configuration document {origin} is not valid UTF-8: {source}")]
    Encoding {
        /// Human-readable description of where the bytes came from.
        origin: String,
        /// Underlying decoding failure.
        #[source]
        source: std::str::Utf8Error,
    },

    /// The YAML parser rejected the document.
    #[error("failed to parse configuration document {origin}: {message}")]
    Parse {
        /// Human-readable description of where the bytes came from.
        origin: String,
        /// Message reported by the YAML parser.
        message: String,
    },

    /// The document parsed, but its top level is not a mapping.
    #[error("configuration document {origin} must be a mapping at the top level, found {found}")]
    InvalidRoot {
        /// Human-readable description of where the bytes came from.
        origin: String,
        /// Kind of value found at the top level.
        found: &'static str,
    },
}

/// Convenient result alias for runtime construction.
pub type CfgsynthResult<T> = Result<T, CfgsynthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn read_error_names_the_path() {
        let err = CfgsynthError::Read {
            path: PathBuf::from("configs/app.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let message = err.to_string();
        assert!(message.contains("configs/app.yaml"), "message: {message}");
        assert!(message.contains("missing"), "message: {message}");
    }

    #[rstest]
    fn invalid_root_reports_kind() {
        let err = CfgsynthError::InvalidRoot {
            origin: String::from("<memory>"),
            found: "sequence",
        };
        assert_eq!(
            err.to_string(),
            "configuration document <memory> must be a mapping at the top level, found sequence"
        );
    }
}
