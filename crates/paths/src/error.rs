//! Failure kinds surfaced by the path algebra.

use std::io;

use thiserror::Error;

/// Result type for fallible path operations.
pub type PathResult<T> = Result<T, PathError>;

/// Errors from the operations that consult the platform or parse URLs.
///
/// The algebra itself is total; only absolute-path resolution and `file://`
/// URL conversion can fail.
#[derive(Debug, Error)]
pub enum PathError {
    /// A `file://` URL was malformed or used an unsupported host.
    #[error("illegal URL '{url}': {reason}")]
    IllegalUrl {
        /// The offending URL, verbatim.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
    /// The platform rejected an absolute-path resolution.
    #[error("couldn't determine absolute path of '{path}'")]
    BadFilename {
        /// The path that failed to resolve.
        path: String,
        /// The underlying platform error, when one was reported.
        #[source]
        source: Option<io::Error>,
    },
}

impl PathError {
    pub(crate) fn illegal_url(url: &str, reason: impl Into<String>) -> Self {
        PathError::IllegalUrl {
            url: url.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_filename(path: &str, source: Option<io::Error>) -> Self {
        PathError::BadFilename {
            path: path.to_owned(),
            source,
        }
    }
}
