use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("file notifications unavailable: {0}")]
    Backend(#[source] notify::Error),

    #[error("cannot watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("cannot resolve directory {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("override path has no file name: {path}")]
    NoFileName { path: PathBuf },
}

pub type WatchResult<T> = Result<T, WatchError>;
