//! Error types used by the crate.

use thiserror::Error;

/// Mapedit error type.
#[derive(Debug, Error)]
pub enum EditorError {
    /// I/O error (network or file)
    #[error("failed to load data")]
    Io,
    /// The backend answered with an error payload.
    #[error("server error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for EditorError {
    fn from(_value: reqwest::Error) -> Self {
        Self::Io
    }
}
