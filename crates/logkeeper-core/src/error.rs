//! Error types for the log service.
//!
//! Three layers, each a closed set:
//!
//! - [`StoreError`] — faults raised by a [`RecordStore`](crate::RecordStore)
//! - [`ServiceError`] — what a caller of [`LoggingService`](crate::LoggingService) sees
//! - [`RecordError`] — a record could not be constructed from its parts

use thiserror::Error;

/// Faults surfaced by a record store.
///
/// A fault is never the same thing as "no results": an empty scan or a
/// zero-count delete is `Ok`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted data could not be read back.
    #[error("corrupt record in {location}: {reason}")]
    Corrupt {
        /// Where the bad data was found.
        location: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The store has been closed and no longer accepts operations.
    #[error("record store closed")]
    Closed,

    /// A background storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),
}

/// Errors returned at the service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested read limit is above the configured ceiling.
    #[error("requested limit {requested} exceeds the maximum of {max}")]
    LimitExceeded {
        /// The limit the caller asked for.
        requested: usize,
        /// The configured ceiling.
        max: usize,
    },

    /// The record store failed; the service is temporarily unavailable.
    #[error("service unavailable: {0}")]
    Unavailable(#[from] StoreError),
}

impl ServiceError {
    /// Returns true if the caller can fix the request and retry.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::LimitExceeded { .. })
    }
}

/// Errors building a [`LogRecord`](crate::LogRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The origin service was empty.
    #[error("origin service must not be empty")]
    EmptyOriginService,

    /// A level name did not match any known level.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
