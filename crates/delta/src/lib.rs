#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `delta` compares two immutable directory snapshots of a versioned tree
//! and drives an [`Editor`] with the minimal stream of edits that turns one
//! into the other: adds, deletes, replaces with an optional ancestor,
//! property changes and text deltas.
//!
//! # Design
//!
//! The driver ([`dir_delta`], [`DirDelta`]) performs a synchronous
//! recursive merge-walk over the sorted entry lists of both snapshots.
//! Edits are emitted in a fully deterministic order: property changes on a
//! directory precede its child edits, children are visited in entry-name
//! order, and open/close calls follow a strict LIFO discipline with never
//! more than one sibling open at a time.
//!
//! When an entry changed identity, the driver picks a replace ancestor by
//! scanning the source directory for the entry with the smallest identity
//! distance; ties resolve to the first candidate found so that recorded
//! edit streams stay byte-stable. Byte-level text diffing is not part of
//! this crate: the driver pulls windows from a [`TextDeltaFactory`]
//! supplied by the caller, falling back to [`FullTextFactory`] which sends
//! the target content wholesale.
//!
//! # Invariants
//!
//! - Repeating a diff over identical snapshots yields a byte-identical
//!   editor call sequence.
//! - On success every frame opened by the driver has been closed exactly
//!   once; on cancellation the driver closes the frames it opened before
//!   returning [`DeltaError::Cancelled`].
//! - Snapshot handles opened by the driver are released before the
//!   corresponding editor close call returns.
//!
//! # Errors
//!
//! Any snapshot or editor failure propagates out unwound as a
//! [`DeltaError`]; the driver performs only its own cleanup on the way.
//! A source snapshot without a base revision is
//! [`DeltaError::NoSuchRevision`].
//!
//! # See also
//!
//! - `repofs-paths` for the path algebra the edit consumers use; the two
//!   crates are deliberately independent.

mod driver;
mod editor;
mod error;
mod snapshot;
mod text;
mod types;

pub use driver::{dir_delta, DirDelta};
pub use editor::{Ancestor, Editor, TextDeltaSink};
pub use error::{DeltaError, DeltaResult};
pub use snapshot::{DirSnapshot, FileSnapshot};
pub use text::{DeltaWindow, FullTextFactory, TextDeltaFactory, TextDeltaStream};
pub use types::{CopyFrom, Dirent, NodeId, NodeKind, PropList, Revision};
