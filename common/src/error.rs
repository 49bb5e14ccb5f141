//! Error type shared by every backend-facing operation.
//!
//! Errors are not classified by cause beyond what the backend reports:
//! the message string is what reaches the UI.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transport-level failure (connection refused, TLS, body read).
    #[error("backend request failed: {0}")]
    Backend(String),

    /// The backend answered with a non-success status.
    #[error("backend error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// A single-row query matched nothing.
    #[error("no matching row in {table}")]
    NotFound { table: String },

    /// Required form fields are missing or malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// An uploaded image could not be decoded or re-encoded.
    #[error("image conversion failed: {0}")]
    Image(String),

    /// A row came back in a shape the model types cannot decode.
    #[error("unexpected row shape: {0}")]
    Decode(String),

    /// The caller has no session (or the session was not an admin's).
    #[error("not authenticated")]
    Unauthenticated,
}

impl Error {
    pub fn not_found(table: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
