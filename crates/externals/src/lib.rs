#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `externals` handles the `svn:externals` directory property: a
//! newline-delimited description mapping target subdirectories to the URLs
//! (and optionally revisions) that should be checked out into them.
//!
//! # Design
//!
//! [`parse_description`] turns one property value into a map keyed by
//! target directory; [`driver::handle_externals_change`] diffs the old and
//! new descriptions of a parent directory and executes the resulting
//! checkout/remove/replace actions through a caller-supplied
//! [`driver::WorkingCopy`]. The actual checkout and removal machinery is an
//! external collaborator; this crate only decides *what* must happen.
//!
//! # Errors
//!
//! A malformed description line is [`ExternalsError::InvalidDescription`]
//! carrying the parent path and the offending line. When removing a
//! dropped external the working copy may report
//! [`ExternalsError::LocalModifications`]; the driver tolerates that one
//! (the directory is left behind) and re-raises everything else.
//!
//! # Examples
//!
//! ```
//! use externals::{parse_description, PegRevision};
//!
//! let desc = "third-party/skins         http://example.com/skinproj\n\
//!             third-party/sounds -r 20  http://example.com/soundsproj\n";
//! let items = parse_description("/wc/calc", desc).unwrap();
//! assert_eq!(items["third-party/sounds"].revision, PegRevision::Number(20));
//! ```

pub mod driver;
mod error;

use std::collections::BTreeMap;

pub use error::{ExternalsError, ExternalsResult};

/// Name of the directory property this crate interprets.
pub const EXTERNALS_PROP: &str = "svn:externals";

/// A repository revision number.
pub type Revision = u64;

/// The revision an external is pinned to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PegRevision {
    /// Track the latest revision.
    Head,
    /// Pinned to a specific revision via `-rN` or `-r N`.
    Number(Revision),
}

/// One parsed line of an externals description.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalItem {
    /// Subdirectory (relative to the parent directory holding the
    /// property) the external is checked out into.
    pub target_dir: String,
    /// Where to check out from.
    pub url: String,
    /// Which revision to check out.
    pub revision: PegRevision,
}

/// Parsed form of one property value: target directory to item. Duplicate
/// target directories resolve last-wins.
pub type Description = BTreeMap<String, ExternalItem>;

/// Parses one `svn:externals` property value.
///
/// Lines are separated by `\n`/`\r`; blank lines and `#` comments are
/// skipped. Fields split on runs of spaces and tabs. Accepted shapes:
///
/// ```text
/// TARGET_DIR URL
/// TARGET_DIR -rN URL
/// TARGET_DIR -r N URL
/// ```
///
/// `parent_dir` only contextualises error messages.
///
/// # Errors
///
/// [`ExternalsError::InvalidDescription`] for any other line shape or an
/// unparsable revision number.
pub fn parse_description(parent_dir: &str, desc: &str) -> ExternalsResult<Description> {
    let mut externals = Description::new();

    for line in desc.split(['\n', '\r']) {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let invalid = || ExternalsError::invalid_description(parent_dir, line);

        let item = match fields.as_slice() {
            [target_dir, url] => ExternalItem {
                target_dir: (*target_dir).to_owned(),
                url: (*url).to_owned(),
                revision: PegRevision::Head,
            },
            [target_dir, rev, url] => {
                let rev = rev.strip_prefix("-r").filter(|r| !r.is_empty()).ok_or_else(invalid)?;
                ExternalItem {
                    target_dir: (*target_dir).to_owned(),
                    url: (*url).to_owned(),
                    revision: PegRevision::Number(rev.parse().map_err(|_| invalid())?),
                }
            }
            [target_dir, flag, rev, url] => {
                if *flag != "-r" {
                    return Err(invalid());
                }
                ExternalItem {
                    target_dir: (*target_dir).to_owned(),
                    url: (*url).to_owned(),
                    revision: PegRevision::Number(rev.parse().map_err(|_| invalid())?),
                }
            }
            _ => return Err(invalid()),
        };

        externals.insert(item.target_dir.clone(), item);
    }

    Ok(externals)
}
