//! Error types for grabby-runner.
//!
//! The `Display` text of each variant is what the extension sees in the
//! `error` field of a failed conversion.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Everything that stops a conversion from producing captured output.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The entry-point script is absent; nothing was launched.
    #[error("run.bat not found")]
    ScriptNotFound { path: PathBuf },

    /// The process outlived the timeout and was killed.
    #[error("Conversion process timed out")]
    Timeout { timeout: Duration },

    /// The process could not be started.
    #[error("failed to launch {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while inspecting the script or supervising the process.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pipe reader thread died before handing back its output.
    #[error("lost {stream} of conversion process")]
    Capture { stream: &'static str },
}

/// Convenience constructor for [`RunnerError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RunnerError {
    RunnerError::Io {
        path: path.into(),
        source,
    }
}
