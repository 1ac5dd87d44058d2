use thiserror::Error;

/// Failures that escape every handler and end the host loop.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error on {stream}: {source}")]
    Io {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error(transparent)]
    Core(#[from] grabby_core::CoreError),
}

pub(crate) fn io_err(stream: &'static str, source: std::io::Error) -> HostError {
    HostError::Io { stream, source }
}
