//! Error types for superlists.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for superlists.
#[derive(Error, Debug)]
pub enum Error {
    /// No list exists under the requested identity.
    #[error("List not found: {list_id}")]
    ListNotFound {
        /// The requested list identity.
        list_id: String,
    },

    /// A list identity could not be parsed.
    #[error("Invalid list id: {value}")]
    InvalidListId {
        /// The rejected input.
        value: String,
    },

    /// Item text was empty or whitespace only.
    #[error("Item text must not be empty")]
    EmptyItem,

    /// Storage backend failure.
    #[error("Storage error ({backend}): {message}")]
    Storage {
        /// Backend name (memory, sqlite).
        backend: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if the requested list does not exist or cannot exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound { .. } | Self::InvalidListId { .. })
    }

    /// Returns `true` if the error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.is_not_found() || matches!(self, Self::EmptyItem)
    }

    /// Creates a list-not-found error.
    #[must_use]
    pub fn list_not_found(list_id: impl std::fmt::Display) -> Self {
        Self::ListNotFound {
            list_id: list_id.to_string(),
        }
    }

    /// Creates a storage error with the given backend name and message.
    #[must_use]
    pub fn storage(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage("sqlite", e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::list_not_found("abc").is_not_found());
        assert!(Error::InvalidListId {
            value: "nope".to_string()
        }
        .is_not_found());
        assert!(Error::EmptyItem.is_client_error());
        assert!(!Error::storage("sqlite", "disk full").is_client_error());
        assert!(!Error::internal("boom").is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = Error::storage("sqlite", "database is locked");
        assert_eq!(err.to_string(), "Storage error (sqlite): database is locked");
        assert_eq!(
            Error::list_not_found("1234").to_string(),
            "List not found: 1234"
        );
    }
}
