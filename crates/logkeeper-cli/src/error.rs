//! CLI error types.

use logkeeper_core::{RecordError, ServiceError, StoreError};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The logging service rejected or failed the request.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The record could not be built from the arguments.
    #[error("invalid record: {0}")]
    Record(#[from] RecordError),

    /// The record store could not be opened.
    #[error("cannot open record store: {0}")]
    Store(#[from] StoreError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// A search over the read limit exits with 2 so scripts can tell a
    /// correctable request from a storage failure.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Service(e) if e.is_client_error() => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_exceeded_display() {
        let err = CliError::from(ServiceError::LimitExceeded {
            requested: 500,
            max: 100,
        });
        assert_eq!(
            err.to_string(),
            "requested limit 500 exceeds the maximum of 100"
        );
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn store_failure_exits_with_failure() {
        let err = CliError::from(ServiceError::Unavailable(StoreError::Closed));
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn record_error_display() {
        let err = CliError::from(RecordError::EmptyOriginService);
        assert_eq!(err.to_string(), "invalid record: origin service must not be empty");
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
