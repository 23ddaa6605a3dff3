#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `paths` implements the canonical path algebra used throughout the repofs
//! client. Three disjoint path flavors are supported, each with its own
//! canonical form:
//!
//! - **relpaths** ([`relpath`]): repository-relative, slash-separated paths
//!   with no root prefix,
//! - **dirents** ([`dirent`]): local filesystem paths, parameterised over a
//!   [`Style`] so that POSIX and DOS semantics can be exercised from the same
//!   binary,
//! - **URIs** ([`uri`]): scheme-qualified locators with a fixed
//!   percent-encoding discipline.
//!
//! Two auxiliary flavors round out the set: [`fspath`] for server-side
//! absolute paths (`/` + relpath) and [`urlpath`] for inputs that may be
//! either a full URL or a server-relative path.
//!
//! # Design
//!
//! Canonical form is an invariant, not a convenience. Every operation other
//! than `canonicalize` itself assumes canonical inputs and asserts them in
//! debug builds; behaviour on non-canonical inputs in release builds is
//! unspecified. Canonicalisation is a single pass that detects the
//! flavor-specific root prefix, then walks the remainder segment by segment,
//! dropping empty and `.` segments. `..` segments are *not* collapsed: doing
//! so would change the meaning of paths that traverse symlinks.
//!
//! Operations that merely shorten a path (`dirname`, `basename`,
//! `skip_ancestor`, `longest_ancestor`, `is_child`) return subslices of their
//! input and never allocate.
//!
//! # Invariants
//!
//! - `canonicalize(canonicalize(x)) == canonicalize(x)` for every flavor and
//!   every input.
//! - `is_canonical(x)` is true exactly when `x == canonicalize(x)`.
//! - For canonical non-root `p`, `join(dirname(p), basename(p)) == p`.
//!
//! # Errors
//!
//! The algebra is total except for the operations that consult the platform:
//! absolute-path resolution and `file://` URL conversion surface
//! [`PathError`]; everything else cannot fail.
//!
//! # Examples
//!
//! ```
//! use paths::{dirent, uri, Style};
//!
//! assert_eq!(uri::canonicalize("http://HOST//a/./b/"), "http://host/a/b");
//! assert_eq!(dirent::join_many(Style::Posix, "/a", &["b", "/c", "d"]), "/c/d");
//! assert_eq!(dirent::longest_ancestor(Style::Posix, "/a/b/c", "/a/b/d"), "/a/b");
//! ```
//!
//! # See also
//!
//! - `repofs-delta` for the tree-delta engine that consumes repository
//!   relative paths produced here.

mod canon;
mod error;
mod style;

pub mod dirent;
pub mod fspath;
pub mod relpath;
pub mod uri;
pub mod urlpath;

pub use error::{PathError, PathResult};
pub use style::Style;
