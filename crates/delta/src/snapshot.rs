//! Read-only handles onto immutable directory and file snapshots.
//!
//! Snapshots are the driver's only view of the versioned tree. Handles
//! are reference counted (`Rc`); the driver drops every handle it opens
//! before the corresponding editor close call returns, so implementations
//! may tie scarce resources to handle lifetime.

use std::io::Read;
use std::rc::Rc;

use crate::error::DeltaResult;
use crate::types::{Dirent, PropList, Revision};

/// A directory at some revision.
pub trait DirSnapshot {
    /// The revision this snapshot was taken at, when it has one. The
    /// delta driver refuses a source without a base revision.
    fn base_revision(&self) -> Option<Revision>;

    /// The directory's entries, sorted by entry name bytes.
    fn entries(&self) -> DeltaResult<Vec<Dirent>>;

    /// The directory's own property list.
    fn dir_props(&self) -> DeltaResult<PropList>;

    /// The property list attached to the entry `name` of this directory
    /// (not the properties of the node it refers to).
    fn entry_props(&self, name: &str) -> DeltaResult<PropList>;

    /// Opens the child directory `name`.
    fn open_dir(&self, name: &str) -> DeltaResult<Rc<dyn DirSnapshot>>;

    /// Opens the child file `name`.
    fn open_file(&self, name: &str) -> DeltaResult<Rc<dyn FileSnapshot>>;
}

/// A file at some revision.
pub trait FileSnapshot {
    /// The revision this snapshot was taken at, when it has one.
    fn base_revision(&self) -> Option<Revision>;

    /// The file's property list.
    fn props(&self) -> DeltaResult<PropList>;

    /// A fresh stream over the file's content bytes.
    fn contents(&self) -> DeltaResult<Box<dyn Read>>;
}
