//! Failure kinds for externals parsing and change handling.

use std::io;

use thiserror::Error;

/// Result type for externals operations.
pub type ExternalsResult<T> = Result<T, ExternalsError>;

/// Errors surfaced while parsing descriptions or applying changes.
#[derive(Debug, Error)]
pub enum ExternalsError {
    /// A description line did not match any accepted shape.
    #[error("error parsing svn:externals property on '{parent_dir}': invalid line: '{line}'")]
    InvalidDescription {
        /// Directory whose property was being parsed.
        parent_dir: String,
        /// The offending line, verbatim.
        line: String,
    },
    /// A working copy refused removal because it has local modifications.
    /// The change driver tolerates this during external removal.
    #[error("working copy '{path}' has local modifications")]
    LocalModifications {
        /// The working copy path that could not be removed.
        path: String,
    },
    /// Path resolution failed while locating an external's checkout dir.
    #[error(transparent)]
    Path(#[from] paths::PathError),
    /// I/O failure from the working copy layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExternalsError {
    pub(crate) fn invalid_description(parent_dir: &str, line: &str) -> Self {
        ExternalsError::InvalidDescription {
            parent_dir: parent_dir.to_owned(),
            line: line.to_owned(),
        }
    }
}
