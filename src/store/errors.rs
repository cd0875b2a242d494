//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the data-access layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Engine error (constraint, syntax, I/O inside SQLite)
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema or seed file could not be read
    #[error("Failed to read {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raw statement refused before reaching the engine
    #[error("{0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_message_is_passed_through() {
        let err = StoreError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.to_string(), rusqlite::Error::InvalidQuery.to_string());
    }

    #[test]
    fn test_rejected_display() {
        let err = StoreError::Rejected("nope".to_string());
        assert_eq!(err.to_string(), "nope");
    }
}
