//! Error types for mentorlog.
//!
//! This module defines all error types used throughout the mentorlog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mentorlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// A persisted collection payload could not be decoded.
    ///
    /// Read paths recover from this by treating the collection as empty;
    /// it is surfaced only for diagnostics.
    #[error("collection '{collection}' holds an undecodable payload: {source}")]
    CorruptCollection {
        /// Name of the affected collection.
        collection: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Draft Errors ===
    /// A draft was submitted without a required field.
    #[error("cannot submit {record} draft: missing {field}")]
    DraftIncomplete {
        /// Which record schema the draft belongs to.
        record: &'static str,
        /// The field that was missing or empty.
        field: &'static str,
    },

    // === Advisory Errors ===
    /// The external advisory call failed or returned no content.
    ///
    /// Never escapes the gateway; `advise` collapses it into fallback text.
    #[error("advisory request failed: {0}")]
    Advisory(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for mentorlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new advisory error.
    #[must_use]
    pub fn advisory(message: impl Into<String>) -> Self {
        Self::Advisory(message.into())
    }

    /// Create an incomplete-draft error for the given schema and field.
    #[must_use]
    pub fn draft_incomplete(record: &'static str, field: &'static str) -> Self {
        Self::DraftIncomplete { record, field }
    }

    /// Check if this error came from an undecodable collection payload.
    #[must_use]
    pub fn is_corrupt_collection(&self) -> bool {
        matches!(self, Self::CorruptCollection { .. })
    }

    /// Check if this error is an incomplete-draft submission.
    #[must_use]
    pub fn is_draft_incomplete(&self) -> bool {
        matches!(self, Self::DraftIncomplete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_error_display() {
        let err = Error::advisory("connection refused");
        assert_eq!(
            err.to_string(),
            "advisory request failed: connection refused"
        );
    }

    #[test]
    fn test_draft_incomplete_display() {
        let err = Error::draft_incomplete("observation", "teacherName");
        let msg = err.to_string();
        assert!(msg.contains("observation"));
        assert!(msg.contains("teacherName"));
    }

    #[test]
    fn test_is_draft_incomplete() {
        assert!(Error::draft_incomplete("feedback", "teacherName").is_draft_incomplete());
        assert!(!Error::advisory("x").is_draft_incomplete());
    }

    #[test]
    fn test_corrupt_collection_display() {
        let decode_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err = Error::CorruptCollection {
            collection: "observations".to_string(),
            source: decode_err,
        };
        assert!(err.to_string().contains("observations"));
        assert!(err.is_corrupt_collection());
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::ConfigValidation {
            message: "model must not be empty".to_string(),
        };
        assert!(err.to_string().contains("model must not be empty"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_directory_create_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
