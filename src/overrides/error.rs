use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Reasons an override file could not be turned into a mapping.
///
/// These never reach callers of the store; they are logged and the previous mapping is kept.
pub enum OverrideError {
    /// Reading the file or its metadata failed.
    #[error("failed to read overrides at {path}: {source}")]
    Io {
        /// Override file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or the object has non-string values.
    #[error("failed to parse overrides at {path}: {source}")]
    Parse {
        /// Override file path.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose top-level value is not an object.
    #[error("overrides at {path} must be a JSON object, found {found}")]
    NotAnObject {
        /// Override file path.
        path: PathBuf,
        /// JSON type that was found instead.
        found: &'static str,
    },
}

pub type OverrideResult<T> = Result<T, OverrideError>;
