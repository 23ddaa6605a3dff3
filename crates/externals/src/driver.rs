//! Applying externals description changes to a working copy.
//!
//! Given the old and new `svn:externals` values of one parent directory,
//! the driver computes per-target actions and executes them through the
//! [`WorkingCopy`] collaborator: new targets are checked out, dropped
//! targets are removed from revision control, and targets whose URL or
//! revision changed are wiped and checked out afresh. A subdirectory that
//! merely moved to a different target dir is not recognised as a rename;
//! tracking that would need a global URL index and is not worth the
//! bookkeeping.

use tracing::debug;

use paths::{dirent, relpath, Style};

use crate::error::{ExternalsError, ExternalsResult};
use crate::{parse_description, Description, ExternalItem, PegRevision};

/// The working-copy operations the driver needs. Implementations wrap the
/// client's checkout machinery; the driver stays policy-only.
pub trait WorkingCopy {
    /// Checks out `url` at `revision` into `path`, recursively.
    fn checkout(&mut self, url: &str, path: &str, revision: PegRevision) -> ExternalsResult<()>;

    /// Removes the external working copy at `target_dir` under
    /// `parent_dir` from revision control, deleting it on disk.
    fn remove_from_revision_control(
        &mut self,
        parent_dir: &str,
        target_dir: &str,
    ) -> ExternalsResult<()>;

    /// Deletes the directory `path` outright (for replaced externals).
    fn remove_dir(&mut self, path: &str) -> ExternalsResult<()>;

    /// Creates `path` and any missing parents.
    fn make_dir_recursively(&mut self, path: &str) -> ExternalsResult<()>;
}

/// Diffs two descriptions of `parent_dir` and applies the changes.
///
/// `old_desc`/`new_desc` are raw property values; `None` stands for an
/// absent property. A [`ExternalsError::LocalModifications`] raised while
/// removing a dropped external is suppressed (the directory stays
/// behind); every other error aborts the run.
///
/// # Errors
///
/// Parse failures from either description, and any working-copy error
/// other than the tolerated one above.
pub fn handle_externals_change(
    wc: &mut dyn WorkingCopy,
    parent_dir: &str,
    old_desc: Option<&str>,
    new_desc: Option<&str>,
) -> ExternalsResult<()> {
    let old = match old_desc {
        Some(desc) => parse_description(parent_dir, desc)?,
        None => Description::new(),
    };
    let new = match new_desc {
        Some(desc) => parse_description(parent_dir, desc)?,
        None => Description::new(),
    };

    // Both maps iterate sorted, so a merge-walk visits every target dir
    // exactly once and the action order is deterministic.
    let mut old_iter = old.iter().peekable();
    let mut new_iter = new.iter().peekable();
    loop {
        match (old_iter.peek(), new_iter.peek()) {
            (None, None) => return Ok(()),
            (Some((_, old_item)), None) => {
                remove_external(wc, parent_dir, old_item)?;
                old_iter.next();
            }
            (None, Some((_, new_item))) => {
                add_external(wc, parent_dir, new_item)?;
                new_iter.next();
            }
            (Some((old_dir, old_item)), Some((new_dir, new_item))) => {
                match old_dir.cmp(new_dir) {
                    std::cmp::Ordering::Equal => {
                        if old_item != new_item {
                            replace_external(wc, parent_dir, old_item, new_item)?;
                        }
                        old_iter.next();
                        new_iter.next();
                    }
                    std::cmp::Ordering::Less => {
                        remove_external(wc, parent_dir, old_item)?;
                        old_iter.next();
                    }
                    std::cmp::Ordering::Greater => {
                        add_external(wc, parent_dir, new_item)?;
                        new_iter.next();
                    }
                }
            }
        }
    }
}

fn checkout_path(parent_dir: &str, item: &ExternalItem) -> String {
    let target = relpath::canonicalize(&item.target_dir);
    dirent::join(Style::LOCAL, parent_dir, &target)
}

fn add_external(
    wc: &mut dyn WorkingCopy,
    parent_dir: &str,
    item: &ExternalItem,
) -> ExternalsResult<()> {
    let path = checkout_path(parent_dir, item);
    debug!(url = %item.url, path = %path, "checking out new external");

    // The target dir may span several components; guarantee everything
    // above the final one.
    let (checkout_parent, _) = dirent::split(Style::LOCAL, &path);
    wc.make_dir_recursively(checkout_parent)?;
    wc.checkout(&item.url, &path, item.revision)
}

fn remove_external(
    wc: &mut dyn WorkingCopy,
    parent_dir: &str,
    item: &ExternalItem,
) -> ExternalsResult<()> {
    debug!(target = %item.target_dir, "removing dropped external");
    match wc.remove_from_revision_control(parent_dir, &item.target_dir) {
        Err(ExternalsError::LocalModifications { path }) => {
            debug!(path = %path, "external kept: local modifications");
            Ok(())
        }
        other => other,
    }
}

fn replace_external(
    wc: &mut dyn WorkingCopy,
    parent_dir: &str,
    old_item: &ExternalItem,
    new_item: &ExternalItem,
) -> ExternalsResult<()> {
    debug!(target = %new_item.target_dir, "re-fetching changed external");
    wc.remove_dir(&checkout_path(parent_dir, old_item))?;
    wc.checkout(
        &new_item.url,
        &checkout_path(parent_dir, new_item),
        new_item.revision,
    )
}
