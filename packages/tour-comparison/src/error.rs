//! Typed errors for the tour-comparison library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Extraction itself is
//! infallible by contract; only the storage and messaging collaborators
//! can fail.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage collaborator failed a read or write
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Persisted data could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage collaborator did not respond within the deadline
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur on the message transport.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The transport failed to deliver the request or the response
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The peer answered with a response of the wrong shape
    #[error("unexpected response, expected {expected}")]
    UnexpectedResponse { expected: &'static str },
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for message-channel operations.
pub type ChannelResult<T> = std::result::Result<T, ChannelError>;
