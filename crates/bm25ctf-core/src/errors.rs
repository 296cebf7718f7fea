//! Error types for bm25ctf-core.
//!
//! Only construction can fail. Once a similarity and a scorer exist, scoring
//! never returns an error: malformed statistics show up as `NaN` or infinite
//! scores that the caller can inspect.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for bm25ctf-core operations.
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors raised while configuring a similarity or loading its inputs.
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// A tuning parameter is outside its allowed range.
    #[error("illegal {name} value: {value}, must be {constraint}")]
    InvalidParameter {
        /// Parameter name (`k1`, `b` or `d`).
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human-readable description of the allowed range.
        constraint: &'static str,
    },

    /// Collection or term statistics are inconsistent.
    #[error("Invalid statistics: {message}")]
    InvalidStatistics {
        /// Description of the inconsistency.
        message: String,
    },

    /// A configuration file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("Failed to parse config {}: {message}", .path.display())]
    ConfigParse {
        /// The file that was being parsed.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The configuration file extension is not one of yaml, yml, toml or json.
    #[error("Unsupported config format: {}. Use a .yaml, .yml, .toml or .json file.", .0.display())]
    UnsupportedConfigFormat(PathBuf),
}

impl SimilarityError {
    pub(crate) fn invalid_statistics(message: impl Into<String>) -> Self {
        Self::InvalidStatistics {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = SimilarityError::InvalidParameter {
            name: "k1",
            value: -1.0,
            constraint: "a non-negative finite value",
        };
        assert_eq!(
            err.to_string(),
            "illegal k1 value: -1, must be a non-negative finite value"
        );
    }

    #[test]
    fn test_unsupported_format_mentions_path() {
        let err = SimilarityError::UnsupportedConfigFormat(PathBuf::from("params.ini"));
        assert!(err.to_string().contains("params.ini"));
    }
}
