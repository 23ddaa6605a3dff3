//! Local filesystem paths.
//!
//! Dirents are the only flavor with platform-dependent semantics; every
//! operation takes a [`Style`] selecting the POSIX or the DOS matrix. The
//! internal representation always separates segments with `/`, regardless
//! of the local separator; [`local_style`] is the presentation-only mapping
//! back.
//!
//! Canonical forms per dialect:
//!
//! - POSIX: relpath rules plus an optional single leading `/`; `/` itself is
//!   canonical.
//! - DOS: drive letters are upper case, drive roots are `X:` or `X:/`
//!   (never `X:\`), UNC roots are `//host/share` with a lowercase host and
//!   a verbatim share.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use crate::canon::{self, Kind};
use crate::error::{PathError, PathResult};
use crate::relpath;
use crate::style::Style;
use crate::uri;

/// Returns the canonical form of `dirent`.
///
/// Note that this does not convert local separators; pair it with
/// [`internal_style`] when the input comes straight from a user.
///
/// ```
/// use paths::{dirent, Style};
///
/// assert_eq!(dirent::canonicalize(Style::Posix, "/a/./b//c/"), "/a/b/c");
/// assert_eq!(dirent::canonicalize(Style::Dos, "c:/foo/"), "C:/foo");
/// assert_eq!(dirent::canonicalize(Style::Dos, "//SRV/Share/x"), "//srv/Share/x");
/// ```
#[must_use]
pub fn canonicalize(style: Style, dirent: &str) -> String {
    let mut canon = canon::canonicalize(Kind::Dirent(style), dirent);

    // "X:/" canonicalises to itself; the generic pass chops the slash off.
    if style == Style::Dos {
        let d = dirent.as_bytes();
        if d.len() >= 3
            && d[0].is_ascii_alphabetic()
            && d[1] == b':'
            && d[2] == b'/'
            && canon.len() == 2
        {
            canon.push('/');
        }
    }
    canon
}

/// True exactly when `dirent` equals its own canonicalisation.
#[must_use]
pub fn is_canonical(style: Style, dirent: &str) -> bool {
    let b = dirent.as_bytes();
    let mut rest = dirent;
    if b.first() == Some(&b'/') {
        rest = &dirent[1..];
        if style == Style::Dos && rest.as_bytes().first() == Some(&b'/') {
            // UNC paths carry a host segment with its own case rules; fall
            // back to comparing against the canonical form.
            return dirent == canonicalize(style, dirent);
        }
    } else if style == Style::Dos && b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':' {
        if !b[0].is_ascii_uppercase() {
            return false;
        }
        rest = &dirent[2..];
        if rest.as_bytes().first() == Some(&b'/') {
            rest = &rest[1..];
        }
    }
    relpath::is_canonical(rest)
}

/// True when `dirent` is absolute: a leading `/` under POSIX, a UNC prefix
/// or an upper-case `X:/` under DOS. A lone `/` or `X:` under DOS is rooted
/// but still relative to the current drive or directory.
#[must_use]
pub fn is_absolute(style: Style, dirent: &str) -> bool {
    let d = dirent.as_bytes();
    match style {
        Style::Posix => d.first() == Some(&b'/'),
        Style::Dos => {
            if d.len() >= 2 && d[0] == b'/' && d[1] == b'/' {
                return true;
            }
            d.len() >= 3 && d[0].is_ascii_uppercase() && d[1] == b':' && d[2] == b'/'
        }
    }
}

/// True when `dirent` carries any root prefix, absolute or drive-relative.
#[must_use]
pub fn is_rooted(style: Style, dirent: &str) -> bool {
    canon::dirent_is_rooted(style, dirent)
}

/// True for `/`, for `X:` and `X:/`, and for `//host/share` without a
/// trailing slash.
#[must_use]
pub fn is_root(style: Style, dirent: &str) -> bool {
    let d = dirent.as_bytes();
    if style == Style::Dos {
        if (d.len() == 2 || (d.len() == 3 && d[2] == b'/'))
            && d[1] == b':'
            && d[0].is_ascii_alphabetic()
        {
            return true;
        }
        if d.len() >= 2 && d[0] == b'/' && d[1] == b'/' && d[d.len() - 1] != b'/' {
            let separators = d[2..].iter().filter(|&&c| c == b'/').count();
            return separators == 1;
        }
    }
    d.len() == 1 && d[0] == b'/'
}

/// Joins `component` onto `base`.
///
/// An absolute component replaces the base outright. Under DOS a component
/// with a bare leading `/` is drive-relative: it replaces the path portion
/// of the base's root, and a rooted-but-relative component such as `X:foo`
/// also resets the base.
///
/// ```
/// use paths::{dirent, Style};
///
/// assert_eq!(dirent::join(Style::Posix, "/a", "b"), "/a/b");
/// assert_eq!(dirent::join(Style::Posix, "/a", "/b"), "/b");
/// assert_eq!(dirent::join(Style::Dos, "C:/a/b", "/x"), "C:/x");
/// ```
#[must_use]
pub fn join(style: Style, base: &str, component: &str) -> String {
    debug_assert!(is_canonical(style, base));
    debug_assert!(is_canonical(style, component));

    if is_absolute(style, component) {
        return component.to_owned();
    }
    if base.is_empty() {
        return component.to_owned();
    }
    if component.is_empty() {
        return base.to_owned();
    }

    let drive_root;
    let mut base = base;
    let mut component = component;
    if style == Style::Dos {
        if component.as_bytes()[0] == b'/' {
            // '/' is drive-relative on DOS, not absolute like on POSIX.
            if is_rooted(style, base) {
                let blen = canon::dirent_root_length(style, base.as_bytes());
                component = &component[1..];
                if blen == 2 && base.as_bytes()[1] == b':' {
                    drive_root = format!("{}/", &base[..2]);
                    base = &drive_root;
                } else {
                    base = &base[..blen];
                }
                if component.is_empty() {
                    return base.to_owned();
                }
            } else {
                return component.to_owned();
            }
        } else if is_rooted(style, component) {
            return component.to_owned();
        }
    }

    let last = base.as_bytes()[base.len() - 1];
    let add_separator = !(last == b'/' || (style == Style::Dos && last == b':'));

    let mut out = String::with_capacity(base.len() + usize::from(add_separator) + component.len());
    out.push_str(base);
    if add_separator {
        out.push('/');
    }
    out.push_str(component);
    out
}

/// Joins a sequence of components onto `base`. A rooted component discards
/// everything accumulated before it.
///
/// ```
/// use paths::{dirent, Style};
///
/// assert_eq!(dirent::join_many(Style::Posix, "/a", &["b", "/c", "d"]), "/c/d");
/// ```
#[must_use]
pub fn join_many(style: Style, base: &str, components: &[&str]) -> String {
    components
        .iter()
        .fold(base.to_owned(), |acc, c| join(style, &acc, c))
}

/// Everything up to (not including) the final segment. The dirname of a
/// root is the root itself.
#[must_use]
pub fn dirname(style: Style, dirent: &str) -> &str {
    debug_assert!(is_canonical(style, dirent));
    let d = dirent.as_bytes();
    if d.len() == canon::dirent_root_length(style, d) {
        dirent
    } else {
        &dirent[..previous_segment_len(style, dirent)]
    }
}

/// The final segment of `dirent`; empty for a root.
#[must_use]
pub fn basename(style: Style, dirent: &str) -> &str {
    debug_assert!(is_canonical(style, dirent));
    if is_root(style, dirent) {
        return "";
    }
    let d = dirent.as_bytes();
    let mut start = d.len();
    while start > 0 && d[start - 1] != b'/' && !(style == Style::Dos && d[start - 1] == b':') {
        start -= 1;
    }
    &dirent[start..]
}

/// Splits `dirent` into `(dirname, basename)`.
#[must_use]
pub fn split(style: Style, dirent: &str) -> (&str, &str) {
    (dirname(style, dirent), basename(style, dirent))
}

/// The portion of `child` strictly below `parent`, or `None` when `child`
/// is not a proper child. The empty dirent is parent of everything that is
/// not rooted.
#[must_use]
pub fn is_child<'a>(style: Style, parent: &str, child: &'a str) -> Option<&'a str> {
    canon::is_child_of(Kind::Dirent(style), parent, child)
}

/// True when `parent` equals `child` or `child` lies below it.
#[must_use]
pub fn is_ancestor(style: Style, parent: &str, child: &str) -> bool {
    canon::is_ancestor_of(Kind::Dirent(style), parent, child)
}

/// Returns `child` with the `parent` prefix (and its separator) removed, or
/// `child` unchanged when `parent` is not one of its ancestors.
#[must_use]
pub fn skip_ancestor<'a>(style: Style, parent: &str, child: &'a str) -> &'a str {
    let len = parent.len();
    if child.len() < len || &child.as_bytes()[..len] != parent.as_bytes() {
        return child;
    }
    if child.len() == len {
        return "";
    }
    let root_len = canon::dirent_root_length(style, child.as_bytes());
    if root_len > len {
        // The match ends inside the child's root; different roots.
        return child;
    }
    if len == 1 && child.as_bytes()[0] == b'/' {
        return &child[1..];
    }
    if child.as_bytes()[len] == b'/' {
        return &child[len + 1..];
    }
    if style == Style::Dos && root_len == len && len > 0 {
        return &child[len..];
    }
    child
}

/// The longest canonical prefix that is an ancestor of both operands.
///
/// ```
/// use paths::{dirent, Style};
///
/// assert_eq!(dirent::longest_ancestor(Style::Posix, "/a/b/c", "/a/b/d"), "/a/b");
/// ```
#[must_use]
pub fn longest_ancestor<'a>(style: Style, dirent1: &'a str, dirent2: &str) -> &'a str {
    &dirent1[..canon::longest_ancestor_len(Kind::Dirent(style), dirent1, dirent2)]
}

/// Converts a local-style path to the internal form: local separators
/// become `/` and the result is canonicalised.
#[must_use]
pub fn internal_style(style: Style, dirent: &str) -> String {
    canonicalize(style, &relpath::to_internal_separators(style, dirent))
}

/// Presentation form of a canonical dirent: the empty path prints as `.`
/// and separators take the local shape.
#[must_use]
pub fn local_style(style: Style, dirent: &str) -> String {
    let path = canonicalize(style, dirent);
    if path.is_empty() {
        return ".".to_owned();
    }
    relpath::to_local_separators(style, &path)
}

/// Resolves `dirent` against the process working directory and
/// canonicalises the result.
///
/// # Errors
///
/// [`PathError::BadFilename`] when the working directory cannot be
/// determined or is not representable.
pub fn get_absolute(dirent: &str) -> PathResult<String> {
    debug_assert!(!uri::is_url(dirent));
    let style = Style::LOCAL;
    let canonical = canonicalize(style, dirent);
    if is_rooted(style, &canonical) {
        return Ok(canonical);
    }
    let cwd = env::current_dir().map_err(|e| PathError::bad_filename(dirent, Some(e)))?;
    let cwd = cwd
        .to_str()
        .ok_or_else(|| PathError::bad_filename(dirent, None))?;
    Ok(join(style, &internal_style(style, cwd), &canonical))
}

/// Condenses a set of targets to their common base plus per-target
/// suffixes.
///
/// Each target is made absolute, the common base is the fold of
/// [`longest_ancestor`] across all of them, and with `remove_redundancies`
/// any target that is a descendant of another (or equal to the base) is
/// dropped. Returns `None` for an empty input.
///
/// # Errors
///
/// [`PathError::BadFilename`] when a target cannot be made absolute.
pub fn condense_targets(
    targets: &[&str],
    remove_redundancies: bool,
) -> PathResult<Option<(String, Vec<String>)>> {
    if targets.is_empty() {
        return Ok(None);
    }
    let style = Style::LOCAL;

    let mut abs = Vec::with_capacity(targets.len());
    for target in targets {
        abs.push(get_absolute(target)?);
    }

    if abs.len() == 1 {
        return Ok(Some((abs.swap_remove(0), Vec::new())));
    }

    let mut common = abs[0].clone();
    for item in &abs[1..] {
        let len = canon::longest_ancestor_len(Kind::Dirent(style), &common, item);
        common.truncate(len);
    }

    let mut removed = vec![false; abs.len()];
    if remove_redundancies {
        // When the common part of a pair equals one of the two, the other
        // is its descendant and goes away.
        for i in 0..abs.len() {
            if removed[i] {
                continue;
            }
            for j in (i + 1)..abs.len() {
                if removed[j] {
                    continue;
                }
                let ancestor = longest_ancestor(style, &abs[i], &abs[j]);
                if ancestor.is_empty() {
                    continue;
                }
                if ancestor == abs[i] {
                    removed[j] = true;
                } else if ancestor == abs[j] {
                    removed[i] = true;
                }
            }
        }
        for i in 0..abs.len() {
            if !removed[i] && abs[i] == common {
                removed[i] = true;
            }
        }
    }

    let base_len = common.len();
    let common_is_root = is_root(style, &common);
    let mut condensed = Vec::new();
    for (i, item) in abs.iter().enumerate() {
        if removed[i] {
            continue;
        }
        let mut rel: &str = item;
        if base_len > 0 {
            rel = &item[base_len..];
            if !rel.is_empty() && !common_is_root {
                rel = &rel[1..];
            }
        }
        condensed.push(rel.to_owned());
    }

    Ok(Some((common, condensed)))
}

/// Resolves `dirent` against `base` and verifies the result stays inside
/// `base`.
///
/// The merge is lexical first: `..` segments may not climb above the base.
/// When the merged path already exists on disk it is additionally resolved
/// through the filesystem so a symlink cannot smuggle the result outside.
/// An escape is reported as `Ok((false, None))`, containment as
/// `Ok((true, Some(absolute)))`.
///
/// # Errors
///
/// [`PathError::BadFilename`] when the platform cannot resolve one of the
/// paths involved.
pub fn is_under_root(base: &str, dirent: &str) -> PathResult<(bool, Option<String>)> {
    let style = Style::LOCAL;
    let base = get_absolute(base)?;

    let merged = match lexical_merge(style, &base, dirent) {
        Some(merged) => merged,
        None => return Ok((false, None)),
    };

    let contained = match fs::canonicalize(Path::new(&local_style(style, &merged))) {
        Ok(real) => {
            let real_base = fs::canonicalize(Path::new(&local_style(style, &base)))
                .map_err(|e| PathError::bad_filename(&base, Some(e)))?;
            real.starts_with(&real_base)
        }
        // Nothing on disk yet; the lexical merge already proved containment.
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => return Err(PathError::bad_filename(dirent, Some(e))),
    };

    if contained {
        Ok((true, Some(merged)))
    } else {
        Ok((false, None))
    }
}

/// Merge `path` onto `base` without touching the filesystem. `None` when
/// the path climbs above the base.
fn lexical_merge(style: Style, base: &str, path: &str) -> Option<String> {
    let path = internal_style(style, path);
    if is_rooted(style, &path) {
        return is_ancestor(style, base, &path).then_some(path);
    }

    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                kept.pop()?;
            }
            other => kept.push(other),
        }
    }
    Some(join(style, base, &kept.join("/")))
}

fn previous_segment_len(style: Style, dirent: &str) -> usize {
    let d = dirent.as_bytes();
    if d.is_empty() {
        return 0;
    }
    let mut len = d.len() - 1;
    while len > 0 && d[len] != b'/' && !(style == Style::Dos && d[len] == b':' && len == 1) {
        len -= 1;
    }
    // Keep the separator when what remains is itself a root.
    if canon::dirent_root_length(style, &d[..len + 1]) == len + 1 {
        len + 1
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_canonicalize() {
        assert_eq!(canonicalize(Style::Posix, ""), "");
        assert_eq!(canonicalize(Style::Posix, "/"), "/");
        assert_eq!(canonicalize(Style::Posix, "//"), "/");
        assert_eq!(canonicalize(Style::Posix, "/a/./b//c/"), "/a/b/c");
        assert_eq!(canonicalize(Style::Posix, "a/b/../c"), "a/b/../c");
        assert_eq!(canonicalize(Style::Posix, "./a"), "a");
    }

    #[test]
    fn dos_canonicalize() {
        assert_eq!(canonicalize(Style::Dos, "c:/foo"), "C:/foo");
        assert_eq!(canonicalize(Style::Dos, "c:"), "C:");
        assert_eq!(canonicalize(Style::Dos, "C:/"), "C:/");
        assert_eq!(canonicalize(Style::Dos, "c:/"), "C:/");
        assert_eq!(canonicalize(Style::Dos, "C:/foo/"), "C:/foo");
        assert_eq!(canonicalize(Style::Dos, "//SRV/Share/x"), "//srv/Share/x");
        assert_eq!(canonicalize(Style::Dos, "//srv"), "/srv");
        assert_eq!(canonicalize(Style::Dos, "C:foo"), "C:foo");
    }

    #[test]
    fn dos_backslashes_via_internal_style() {
        // Separator conversion happens ahead of canonicalisation; `..` is
        // never collapsed.
        assert_eq!(internal_style(Style::Dos, "C:\\Foo\\..\\Bar"), "C:/Foo/../Bar");
        assert_eq!(internal_style(Style::Dos, "c:\\dir\\"), "C:/dir");
        assert_eq!(internal_style(Style::Posix, "/a/./b"), "/a/b");
    }

    #[test]
    fn canonical_checks() {
        assert!(is_canonical(Style::Posix, "/a/b"));
        assert!(is_canonical(Style::Posix, ""));
        assert!(is_canonical(Style::Posix, "/"));
        assert!(!is_canonical(Style::Posix, "/a/"));
        assert!(!is_canonical(Style::Posix, "a//b"));
        assert!(is_canonical(Style::Dos, "C:/a"));
        assert!(is_canonical(Style::Dos, "C:"));
        assert!(is_canonical(Style::Dos, "C:/"));
        assert!(!is_canonical(Style::Dos, "c:/a"));
        assert!(is_canonical(Style::Dos, "//srv/Share/x"));
        assert!(!is_canonical(Style::Dos, "//SRV/Share/x"));
    }

    #[test]
    fn absoluteness() {
        assert!(is_absolute(Style::Posix, "/a"));
        assert!(!is_absolute(Style::Posix, "a"));
        assert!(is_absolute(Style::Dos, "C:/a"));
        assert!(is_absolute(Style::Dos, "//srv/share"));
        assert!(!is_absolute(Style::Dos, "C:a"));
        assert!(!is_absolute(Style::Dos, "C:"));
        assert!(!is_absolute(Style::Dos, "/a"));
        assert!(is_rooted(Style::Dos, "/a"));
        assert!(is_rooted(Style::Dos, "C:"));
    }

    #[test]
    fn roots() {
        assert!(is_root(Style::Posix, "/"));
        assert!(!is_root(Style::Posix, "/a"));
        assert!(!is_root(Style::Posix, ""));
        assert!(is_root(Style::Dos, "C:"));
        assert!(is_root(Style::Dos, "C:/"));
        assert!(is_root(Style::Dos, "//srv/share"));
        assert!(!is_root(Style::Dos, "//srv/share/x"));
        assert!(!is_root(Style::Dos, "//srv/share/"));
    }

    #[test]
    fn join_posix() {
        assert_eq!(join(Style::Posix, "/a", "b"), "/a/b");
        assert_eq!(join(Style::Posix, "/", "b"), "/b");
        assert_eq!(join(Style::Posix, "/a", "/b"), "/b");
        assert_eq!(join(Style::Posix, "", "b"), "b");
        assert_eq!(join(Style::Posix, "a", ""), "a");
    }

    #[test]
    fn join_dos() {
        assert_eq!(join(Style::Dos, "C:/a", "b"), "C:/a/b");
        assert_eq!(join(Style::Dos, "C:", "b"), "C:b");
        assert_eq!(join(Style::Dos, "C:/a/b", "/x"), "C:/x");
        assert_eq!(join(Style::Dos, "C:", "/x"), "C:/x");
        assert_eq!(join(Style::Dos, "a", "/x"), "/x");
        assert_eq!(join(Style::Dos, "C:/a", "D:b"), "D:b");
        assert_eq!(join(Style::Dos, "//srv/share", "x"), "//srv/share/x");
        assert_eq!(join(Style::Dos, "C:/a", "//srv/share"), "//srv/share");
    }

    #[test]
    fn join_many_resets_on_rooted_component() {
        assert_eq!(join_many(Style::Posix, "/a", &["b", "/c", "d"]), "/c/d");
        assert_eq!(join_many(Style::Posix, "", &["a", "b"]), "a/b");
        assert_eq!(join_many(Style::Posix, "/a", &[]), "/a");
        assert_eq!(join_many(Style::Dos, "C:/a", &["b", "/x", "y"]), "C:/x/y");
    }

    #[test]
    fn dirnames_and_basenames() {
        assert_eq!(dirname(Style::Posix, "/a/b"), "/a");
        assert_eq!(dirname(Style::Posix, "/a"), "/");
        assert_eq!(dirname(Style::Posix, "/"), "/");
        assert_eq!(dirname(Style::Posix, "a"), "");
        assert_eq!(basename(Style::Posix, "/a/b"), "b");
        assert_eq!(basename(Style::Posix, "/"), "");
        assert_eq!(dirname(Style::Dos, "C:/a"), "C:/");
        assert_eq!(dirname(Style::Dos, "C:/"), "C:/");
        assert_eq!(dirname(Style::Dos, "C:foo"), "C:");
        assert_eq!(basename(Style::Dos, "C:foo"), "foo");
        assert_eq!(basename(Style::Dos, "C:/"), "");
        assert_eq!(dirname(Style::Dos, "//srv/share/x"), "//srv/share");
        assert_eq!(dirname(Style::Dos, "//srv/share"), "//srv/share");
        assert_eq!(split(Style::Posix, "/a/b"), ("/a", "b"));
    }

    #[test]
    fn children_and_ancestors() {
        assert_eq!(is_child(Style::Posix, "/a", "/a/b"), Some("b"));
        assert_eq!(is_child(Style::Posix, "/", "/a"), Some("a"));
        assert_eq!(is_child(Style::Posix, "/a", "/a"), None);
        assert_eq!(is_child(Style::Posix, "/", "//"), None);
        assert_eq!(is_child(Style::Posix, "", "a"), Some("a"));
        assert_eq!(is_child(Style::Posix, "", "/a"), None);
        assert_eq!(is_child(Style::Dos, "C:", "C:foo"), Some("foo"));
        assert_eq!(is_child(Style::Dos, "C:/", "C:/foo"), Some("foo"));
        assert_eq!(is_child(Style::Dos, "", "C:foo"), None);

        assert!(is_ancestor(Style::Posix, "/a", "/a/b"));
        assert!(is_ancestor(Style::Posix, "/a", "/a"));
        assert!(is_ancestor(Style::Posix, "", "a/b"));
        assert!(!is_ancestor(Style::Posix, "", "/a"));
        assert!(!is_ancestor(Style::Posix, "/a", "/ab"));
        assert!(is_ancestor(Style::Dos, "C:", "C:foo"));
        assert!(!is_ancestor(Style::Dos, "", "C:foo"));
    }

    #[test]
    fn skipping() {
        assert_eq!(skip_ancestor(Style::Posix, "/a", "/a/b"), "b");
        assert_eq!(skip_ancestor(Style::Posix, "/", "/a"), "a");
        assert_eq!(skip_ancestor(Style::Posix, "/a", "/a"), "");
        assert_eq!(skip_ancestor(Style::Posix, "/x", "/a/b"), "/a/b");
        assert_eq!(skip_ancestor(Style::Dos, "C:", "C:foo"), "foo");
        assert_eq!(skip_ancestor(Style::Dos, "C:/", "C:/foo"), "foo");
        assert_eq!(skip_ancestor(Style::Dos, "C:/a", "C:/a/b"), "b");
    }

    #[test]
    fn longest_ancestors() {
        assert_eq!(longest_ancestor(Style::Posix, "/a/b/c", "/a/b/d"), "/a/b");
        assert_eq!(longest_ancestor(Style::Posix, "/", "/a"), "/");
        assert_eq!(longest_ancestor(Style::Posix, "/a", "/b"), "/");
        assert_eq!(longest_ancestor(Style::Posix, "a", "b"), "");
        assert_eq!(longest_ancestor(Style::Posix, "/foo/bar", "/foobar"), "/");
        assert_eq!(longest_ancestor(Style::Dos, "C:/a/b", "C:/a/c"), "C:/a");
        assert_eq!(longest_ancestor(Style::Dos, "C:/a", "C:/b"), "C:/");
        assert_eq!(longest_ancestor(Style::Dos, "C:/a", "D:/a"), "");
        assert_eq!(longest_ancestor(Style::Dos, "C:", "C:/"), "");
        assert_eq!(longest_ancestor(Style::Dos, "C:a", "C:b"), "C:");
        assert_eq!(
            longest_ancestor(Style::Dos, "//srv/share/a", "//srv/share/b"),
            "//srv/share"
        );
        assert_eq!(longest_ancestor(Style::Dos, "//srv/a/x", "//other/a/x"), "");
    }

    #[test]
    fn local_style_mapping() {
        assert_eq!(local_style(Style::Posix, ""), ".");
        assert_eq!(local_style(Style::Posix, "/a/b"), "/a/b");
        assert_eq!(local_style(Style::Dos, "C:/a/b"), "C:\\a\\b");
    }

    #[test]
    fn get_absolute_keeps_rooted_paths() {
        let abs = get_absolute("/x/y/").expect("absolute");
        assert_eq!(abs, "/x/y");
    }

    #[test]
    fn get_absolute_resolves_relative_paths() {
        let abs = get_absolute("some/relative").expect("absolute");
        assert!(is_absolute(Style::LOCAL, &abs));
        assert!(abs.ends_with("some/relative"));
    }

    #[test]
    fn condense() {
        let (common, rest) = condense_targets(&["/x/a", "/x/a/b", "/x/c"], true)
            .expect("condense")
            .expect("non-empty");
        assert_eq!(common, "/x");
        assert_eq!(rest, vec!["a".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn condense_keeps_redundant_targets_when_asked() {
        let (common, rest) = condense_targets(&["/x/a", "/x/a/b", "/x"], false)
            .expect("condense")
            .expect("non-empty");
        assert_eq!(common, "/x");
        assert_eq!(rest, vec!["a".to_owned(), "a/b".to_owned(), String::new()]);
    }

    #[test]
    fn condense_single_and_empty() {
        assert!(condense_targets(&[], true).expect("condense").is_none());
        let (common, rest) = condense_targets(&["/only"], true)
            .expect("condense")
            .expect("non-empty");
        assert_eq!(common, "/only");
        assert!(rest.is_empty());
    }

    #[test]
    fn condense_disjoint_roots() {
        let (common, rest) = condense_targets(&["/x/a", "/y/b"], true)
            .expect("condense")
            .expect("non-empty");
        assert_eq!(common, "/");
        assert_eq!(rest, vec!["x/a".to_owned(), "y/b".to_owned()]);
    }
}
