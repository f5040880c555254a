//! Protocol error types.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from the generation protocol layer.
///
/// Note that tool-dispatch problems are deliberately NOT here: malformed
/// arguments become error acks fed back to the backend, and persistence
/// failures are logged and swallowed. Only the backend boundary errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP transport failure talking to the generative backend.
    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend rejected request: status {status}: {body}")]
    BackendStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The backend stream reported an error mid-turn.
    #[error("backend stream error: {0}")]
    Stream(String),
}
