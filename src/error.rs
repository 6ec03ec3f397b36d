//! Error types for the Cinedex library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`CinedexError`] enum. Client-input faults (an unknown search mode, a
//! malformed request) are distinct variants from store and embedding
//! failures so that callers can map them to different outcomes.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Cinedex operations.
#[derive(Error, Debug)]
pub enum CinedexError {
    /// I/O errors (snapshot files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An unknown search mode was requested. This is a client-input fault
    /// and is never retried.
    #[error("Invalid search mode: {0}")]
    InvalidMode(String),

    /// A malformed request (empty query, zero result count, bad identifier).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Document store errors.
    #[error("Store error: {0}")]
    Store(String),

    /// Embedding service errors.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A referenced document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`CinedexError`].
pub type Result<T> = std::result::Result<T, CinedexError>;

impl CinedexError {
    /// Create a new invalid-mode error.
    pub fn invalid_mode<S: Into<String>>(mode: S) -> Self {
        CinedexError::InvalidMode(mode.into())
    }

    /// Create a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CinedexError::InvalidArgument(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        CinedexError::Store(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        CinedexError::Embedding(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CinedexError::NotFound(msg.into())
    }

    /// Whether this error is a client-input fault rather than a backend
    /// failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CinedexError::InvalidMode(_) | CinedexError::InvalidArgument(_)
        )
    }
}
