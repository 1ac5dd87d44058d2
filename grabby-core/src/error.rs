//! Error types for grabby-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating the toolchain or interpreting a request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The running executable has no parent directory to anchor the layout on.
    #[error("cannot determine installation directory of {exe}")]
    InstallDirNotFound { exe: PathBuf },

    /// The decoded message was valid JSON but not a request object.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
