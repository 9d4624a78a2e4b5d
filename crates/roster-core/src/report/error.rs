//! Error types for the report pipeline

use thiserror::Error;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur in the report pipeline
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("cannot read '{path}': {source}")]
    FileUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed JSON in '{path}': {source}")]
    MalformedInput {
        path: String,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML serialization error: {0}")]
    Xml(String),
}

impl ReportError {
    /// Process exit code for this error kind, for scriptability
    ///
    /// Database failures map to 2, unreadable input files to 3, and
    /// everything else to the generic 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::Database(_) => 2,
            ReportError::FileUnreadable { .. } => 3,
            _ => 1,
        }
    }

    /// Whether this error aborts the run
    ///
    /// Malformed content and database errors during a load are handled
    /// at file granularity; an unreadable file or a connection-level
    /// failure is not recoverable.
    #[must_use]
    pub fn aborts_pipeline(&self) -> bool {
        !matches!(
            self,
            ReportError::MalformedInput { .. } | ReportError::Database(_)
        )
    }
}
