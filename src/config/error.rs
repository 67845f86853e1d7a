//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Timeout string could not be parsed as whole seconds.
    #[error("failed to parse HTTP timeout '{value}': {source}")]
    TimeoutParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// HTTP timeout must be non-zero.
    #[error("HTTP timeout must be at least one second")]
    ZeroTimeout,

    /// Threshold string could not be parsed as a float.
    #[error("failed to parse threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Threshold is outside `[0.0, 1.0]`.
    #[error("threshold {value} must be between 0.0 and 1.0")]
    ThresholdOutOfRange { value: f64 },

    /// A language code was set to an empty string.
    #[error("language code from {name} cannot be empty")]
    EmptyLanguage { name: &'static str },

    /// The encyclopedia endpoint template has nowhere to put the language code.
    #[error("encyclopedia endpoint '{value}' must contain '{{lang}}'")]
    MissingLangPlaceholder { value: String },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
