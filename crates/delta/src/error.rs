//! Failure kinds surfaced by the tree-delta engine.

use std::io;

use thiserror::Error;

/// Result type for delta operations.
pub type DeltaResult<T> = Result<T, DeltaError>;

/// Errors that can occur while computing or emitting a tree delta.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// I/O failure from a snapshot or content stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The source snapshot carries no base revision to diff against.
    #[error("snapshot has no base revision")]
    NoSuchRevision,
    /// A content or delta stream ended before its declared extent.
    #[error("truncated stream: {context}")]
    Incomplete {
        /// What was being read when the stream ran dry.
        context: String,
    },
    /// The cancellation callback asked the driver to stop.
    #[error("operation cancelled")]
    Cancelled,
    /// The editor rejected an edit.
    #[error("editor rejected edit: {message}")]
    Editor {
        /// The editor's own description of the rejection.
        message: String,
    },
}

impl DeltaError {
    /// Builds an [`DeltaError::Editor`] from any displayable rejection.
    pub fn editor(message: impl Into<String>) -> Self {
        DeltaError::Editor {
            message: message.into(),
        }
    }

    /// True for [`DeltaError::Cancelled`].
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self, DeltaError::Cancelled)
    }
}
