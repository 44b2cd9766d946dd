//! Unified error types for the privrank analysis pipeline.

use tokio_rusqlite::rusqlite;

/// Unified error type surfaced by the analysis pipeline.
///
/// Unparseable analyzer output is deliberately not represented here: a
/// response with no extractable rating is still a successful analysis and is
/// returned as an outcome with no rating.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty host key).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No content source is available to analyze.
    #[error("NO_ACTIVE_SOURCE: {0}")]
    NoActiveSource(String),

    /// Content location failed outright. The locator degrades to a fallback
    /// excerpt instead of raising, so this indicates a broken caller.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractionFailure(String),

    /// The remote analyzer did not answer within the configured bound.
    #[error("ANALYSIS_TIMEOUT: {host}: no answer within {timeout_ms}ms")]
    Timeout { host: String, timeout_ms: u64 },

    /// Transport error or non-success status from the remote analyzer.
    #[error("REMOTE_FAILURE: {0}")]
    RemoteFailure(String),

    /// The persisted rating mapping could not be read or written.
    #[error("STORE_ERROR: {0}")]
    Store(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Store("connection closed".into()),
            tokio_rusqlite::Error::Close(_) => Error::Store("failed to close connection".into()),
            _ => Error::Store("database failure".into()),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Store(err.to_string())
    }
}
