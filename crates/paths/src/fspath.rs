//! Server-side absolute filesystem paths.
//!
//! An fspath is a `/` followed by a relpath; the root itself is `/`. These
//! paths address nodes inside a repository filesystem and never carry a
//! drive or host component, so every operation delegates to the relpath
//! rules after peeling the leading slash.

use crate::relpath;

/// Returns the canonical form of `fspath`.
#[must_use]
pub fn canonicalize(fspath: &str) -> String {
    if fspath == "/" {
        return "/".to_owned();
    }
    format!("/{}", relpath::canonicalize(fspath))
}

/// True exactly when `fspath` equals its own canonicalisation.
#[must_use]
pub fn is_canonical(fspath: &str) -> bool {
    fspath.starts_with('/') && relpath::is_canonical(&fspath[1..])
}

/// True only for `/` itself.
#[must_use]
pub fn is_root(fspath: &str) -> bool {
    fspath == "/"
}

/// Appends a canonical relpath to a canonical fspath.
#[must_use]
pub fn join(fspath: &str, relpath_component: &str) -> String {
    debug_assert!(is_canonical(fspath));
    debug_assert!(relpath::is_canonical(relpath_component));

    if relpath_component.is_empty() {
        fspath.to_owned()
    } else if fspath == "/" {
        format!("/{relpath_component}")
    } else {
        format!("{fspath}/{relpath_component}")
    }
}

/// Everything up to (not including) the final segment; `/` for a
/// single-segment path.
#[must_use]
pub fn dirname(fspath: &str) -> String {
    debug_assert!(is_canonical(fspath));
    format!("/{}", relpath::dirname(&fspath[1..]))
}

/// The final segment of `fspath`; empty for the root.
#[must_use]
pub fn basename(fspath: &str) -> &str {
    debug_assert!(is_canonical(fspath));
    relpath::basename(&fspath[1..])
}

/// Splits `fspath` into `(dirname, basename)`.
#[must_use]
pub fn split(fspath: &str) -> (String, &str) {
    (dirname(fspath), basename(fspath))
}

/// The portion of `child` strictly below `parent`, or `None` when `child`
/// is not a proper child.
#[must_use]
pub fn is_child<'a>(parent: &str, child: &'a str) -> Option<&'a str> {
    debug_assert!(is_canonical(parent));
    debug_assert!(is_canonical(child));
    relpath::is_child(&parent[1..], &child[1..])
}

/// True when `parent` equals `child` or `child` lies below it.
#[must_use]
pub fn is_ancestor(parent: &str, child: &str) -> bool {
    debug_assert!(is_canonical(parent));
    debug_assert!(is_canonical(child));
    relpath::is_ancestor(&parent[1..], &child[1..])
}

/// Returns `child` without the `parent` prefix, or `child` unchanged when
/// `parent` is not one of its ancestors.
#[must_use]
pub fn skip_ancestor<'a>(parent: &str, child: &'a str) -> &'a str {
    debug_assert!(is_canonical(parent));
    debug_assert!(is_canonical(child));

    if relpath::is_ancestor(&parent[1..], &child[1..]) {
        relpath::skip_ancestor(&parent[1..], &child[1..])
    } else {
        child
    }
}

/// The longest canonical fspath that is an ancestor of both operands;
/// at worst the root `/`.
#[must_use]
pub fn longest_ancestor(fspath1: &str, fspath2: &str) -> String {
    debug_assert!(is_canonical(fspath1));
    debug_assert!(is_canonical(fspath2));
    format!("/{}", relpath::longest_ancestor(&fspath1[1..], &fspath2[1..]))
}
