//! Scheme-qualified resource locators.
//!
//! Canonical URIs carry a lowercase scheme and hostname, verbatim userinfo,
//! relpath-shaped path segments and uppercase hex in percent escapes. Bytes
//! allowed by the validity table are stored decoded; everything else is
//! escaped. The URI rules are platform-invariant; only the `file://`
//! conversions take a [`Style`] because they produce and consume dirents.

use crate::canon::{self, Kind};
use crate::dirent;
use crate::error::{PathError, PathResult};
use crate::relpath;
use crate::style::Style;

/// True when `path` looks like a URL: an alphabetic scheme followed by
/// `://`.
#[must_use]
pub fn is_url(path: &str) -> bool {
    let Some(pos) = path.find("://") else {
        return false;
    };
    if pos == 0 {
        return false;
    }
    let b = path.as_bytes();
    b[0].is_ascii_alphabetic()
        && b[1..pos]
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.'))
}

/// Returns the canonical form of `uri`.
///
/// ```
/// assert_eq!(paths::uri::canonicalize("http://HOST//a/./b/"), "http://host/a/b");
/// assert_eq!(paths::uri::canonicalize("http://host/%7euser"), "http://host/~user");
/// assert_eq!(paths::uri::canonicalize("https://"), "https://");
/// ```
#[must_use]
pub fn canonicalize(uri: &str) -> String {
    canon::canonicalize(Kind::Uri, uri)
}

/// True exactly when `uri` equals its own canonicalisation.
#[must_use]
pub fn is_canonical(uri: &str) -> bool {
    if uri.is_empty() {
        return true;
    }
    let b = uri.as_bytes();
    let mut ptr = 0usize;
    let mut seg = 0usize;
    let mut schema_data: Option<usize> = None;

    if b[0] != b'/' {
        let mut i = 0;
        while i < b.len() && b[i] != b'/' && b[i] != b':' {
            i += 1;
        }
        if i + 2 < b.len() && b[i] == b':' && b[i + 1] == b'/' && b[i + 2] == b'/' {
            if b[..i].iter().any(u8::is_ascii_uppercase) {
                return false;
            }
            ptr = i + 3;

            // Userinfo is carried verbatim; the host must be lowercase.
            let mut j = ptr;
            while j < b.len() && b[j] != b'/' && b[j] != b'@' {
                j += 1;
            }
            if j == b.len() {
                return true;
            }
            let host_start = if b[j] == b'@' { j + 1 } else { ptr };
            let mut k = host_start;
            while k < b.len() && b[k] != b'/' {
                if b[k].is_ascii_uppercase() {
                    return false;
                }
                k += 1;
            }
            schema_data = Some(k);
            seg = host_start;
            ptr = k;
        } else {
            while ptr < b.len() && b[ptr] != b'/' {
                ptr += 1;
            }
        }
    }

    // Path walk: no '.' segments, no '//', no trailing '/' (except the
    // bare root "/").
    loop {
        let seglen = ptr - seg;
        if seglen == 1 && b[seg] == b'.' {
            return false;
        }
        if ptr < b.len() && b[ptr] == b'/' && ptr + 1 < b.len() && b[ptr + 1] == b'/' {
            return false;
        }
        if ptr == b.len() {
            if b[ptr - 1] == b'/' && ptr - 1 != 0 {
                return false;
            }
            break;
        }
        if b[ptr] == b'/' {
            ptr += 1;
        }
        seg = ptr;
        while ptr < b.len() && b[ptr] != b'/' {
            ptr += 1;
        }
    }

    if let Some(sd) = schema_data {
        let mut i = sd;
        while i < b.len() {
            if b[i] == b'%' {
                if i + 2 >= b.len() {
                    return false;
                }
                let upper_hex =
                    |c: u8| c.is_ascii_digit() || (b'A'..=b'F').contains(&c);
                if !upper_hex(b[i + 1]) || !upper_hex(b[i + 2]) {
                    return false;
                }
                let val = (canon::hexval(b[i + 1]) << 4) | canon::hexval(b[i + 2]);
                if canon::char_valid(val) {
                    // Should not have been escaped.
                    return false;
                }
                i += 2;
            } else if b[i] != b'/' && !canon::char_valid(b[i]) {
                return false;
            }
            i += 1;
        }
    }

    true
}

/// True for `/` and for a bare `scheme://authority` with no path.
#[must_use]
pub fn is_root(uri: &str) -> bool {
    if uri == "/" {
        return true;
    }
    if uri.is_empty() {
        return false;
    }
    uri.len() == canon::uri_schema_root_length(uri)
}

/// Appends a canonical relpath to a canonical URI. The result is not
/// re-canonicalised.
#[must_use]
pub fn join(base: &str, relpath: &str) -> String {
    debug_assert!(is_canonical(base));
    debug_assert!(relpath::is_canonical(relpath));

    if relpath.is_empty() {
        base.to_owned()
    } else {
        format!("{base}/{relpath}")
    }
}

/// Everything up to (not including) the final segment. The dirname of a
/// root URI is the URI itself.
#[must_use]
pub fn dirname(uri: &str) -> &str {
    debug_assert!(is_canonical(uri));
    if is_root(uri) {
        uri
    } else {
        &uri[..previous_segment_len(uri)]
    }
}

/// The final segment of `uri`; empty for a root.
#[must_use]
pub fn basename(uri: &str) -> &str {
    debug_assert!(is_canonical(uri));
    if is_root(uri) {
        return "";
    }
    let b = uri.as_bytes();
    let mut start = b.len();
    while start > 0 && b[start - 1] != b'/' {
        start -= 1;
    }
    &uri[start..]
}

/// Splits `uri` into `(dirname, basename)`.
#[must_use]
pub fn split(uri: &str) -> (&str, &str) {
    (dirname(uri), basename(uri))
}

/// The portion of `child` strictly below `parent`, or `None` when `child`
/// is not a proper child.
#[must_use]
pub fn is_child<'a>(parent: &str, child: &'a str) -> Option<&'a str> {
    canon::is_child_of(Kind::Uri, parent, child)
}

/// True when `parent` equals `child` or `child` lies below it.
#[must_use]
pub fn is_ancestor(parent: &str, child: &str) -> bool {
    canon::is_ancestor_of(Kind::Uri, parent, child)
}

/// Returns `child` with the `parent` prefix (and its separator) removed, or
/// `child` unchanged when `parent` is not one of its ancestors.
#[must_use]
pub fn skip_ancestor<'a>(parent: &str, child: &'a str) -> &'a str {
    let len = parent.len();
    if child.len() < len || &child.as_bytes()[..len] != parent.as_bytes() {
        return child;
    }
    if child.len() == len {
        return "";
    }
    if len == 1 && child.as_bytes()[0] == b'/' {
        return &child[1..];
    }
    if len > 0 && child.as_bytes()[len] == b'/' {
        return &child[len + 1..];
    }
    child
}

/// The longest canonical prefix that is an ancestor of both operands.
/// A URL and a non-URL, or two URLs with different schemes, share nothing.
#[must_use]
pub fn longest_ancestor<'a>(uri1: &'a str, uri2: &str) -> &'a str {
    let url1 = is_url(uri1);
    let url2 = is_url(uri2);

    if url1 && url2 {
        let a = uri1.as_bytes();
        let b = uri2.as_bytes();
        let mut i = 0;
        loop {
            if a[i] != b[i] {
                return "";
            }
            if a[i] == b':' {
                break;
            }
            i += 1;
        }
        i += 3;

        let len = canon::longest_ancestor_len(Kind::Uri, &uri1[i..], &uri2[i..]);
        if len == 0 || (len == 1 && a[i] == b'/') {
            ""
        } else {
            &uri1[..i + len]
        }
    } else if !url1 && !url2 {
        &uri1[..canon::longest_ancestor_len(Kind::Uri, uri1, uri2)]
    } else {
        ""
    }
}

/// Condenses a set of URIs to their common base plus per-target suffixes.
/// Inputs are canonicalised; with `remove_redundancies` descendants of
/// other targets and targets equal to the base are dropped. Returns `None`
/// for an empty input.
#[must_use]
pub fn condense_targets(
    targets: &[&str],
    remove_redundancies: bool,
) -> Option<(String, Vec<String>)> {
    if targets.is_empty() {
        return None;
    }

    let uris: Vec<String> = targets.iter().map(|t| canonicalize(t)).collect();
    if uris.len() == 1 {
        let mut uris = uris;
        return Some((uris.swap_remove(0), Vec::new()));
    }

    let mut common = uris[0].clone();
    for item in &uris[1..] {
        common = longest_ancestor(&common, item).to_owned();
    }

    let mut removed = vec![false; uris.len()];
    if remove_redundancies {
        for i in 0..uris.len() {
            if removed[i] {
                continue;
            }
            for j in (i + 1)..uris.len() {
                if removed[j] {
                    continue;
                }
                let ancestor = longest_ancestor(&uris[i], &uris[j]);
                if ancestor.is_empty() {
                    continue;
                }
                if ancestor == uris[i] {
                    removed[j] = true;
                } else if ancestor == uris[j] {
                    removed[i] = true;
                }
            }
        }
        for i in 0..uris.len() {
            if !removed[i] && uris[i] == common {
                removed[i] = true;
            }
        }
    }

    let base_len = common.len();
    let common_is_root = is_root(&common);
    let mut condensed = Vec::new();
    for (i, item) in uris.iter().enumerate() {
        if removed[i] {
            continue;
        }
        let mut rel: &str = item;
        if base_len > 0 {
            rel = &item[base_len..];
            if rel.starts_with('/') || (!rel.is_empty() && !common_is_root) {
                rel = &rel[1..];
            }
        }
        condensed.push(rel.to_owned());
    }

    Some((common, condensed))
}

/// Percent-encodes every byte the validity table rejects; `/` passes
/// through.
#[must_use]
pub fn uri_encode(path: &str) -> String {
    encode_bytes(path.as_bytes())
}

/// Decodes percent escapes. A `%` that does not start a valid escape is
/// copied verbatim.
///
/// # Errors
///
/// [`PathError::IllegalUrl`] when the decoded bytes are not valid UTF-8.
pub fn uri_decode(text: &str) -> PathResult<String> {
    String::from_utf8(decode_bytes(text))
        .map_err(|_| PathError::illegal_url(text, "percent-decoded bytes are not valid UTF-8"))
}

pub(crate) fn encode_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'/' || canon::char_valid(b) {
            out.push(b as char);
        } else {
            canon::push_escaped(&mut out, b);
        }
    }
    out
}

pub(crate) fn decode_bytes(text: &str) -> Vec<u8> {
    let t = text.as_bytes();
    let mut out = Vec::with_capacity(t.len());
    let mut i = 0;
    while i < t.len() {
        if t[i] == b'%' && i + 2 < t.len() && t[i + 1].is_ascii_hexdigit() && t[i + 2].is_ascii_hexdigit()
        {
            out.push((canon::hexval(t[i + 1]) << 4) | canon::hexval(t[i + 2]));
            i += 3;
        } else {
            out.push(t[i]);
            i += 1;
        }
    }
    out
}

/// Builds a `file://` URL from a canonical dirent.
///
/// A relative dirent is made absolute first. Under DOS rules a UNC dirent
/// keeps its host in the authority slot and a drive-rooted dirent lands
/// behind `file:///`.
///
/// # Errors
///
/// [`PathError::BadFilename`] when the dirent cannot be made absolute.
pub fn file_url_from_dirent(style: Style, dirent_path: &str) -> PathResult<String> {
    debug_assert!(dirent::is_canonical(style, dirent_path));

    let abs = if dirent::is_rooted(style, dirent_path) {
        dirent_path.to_owned()
    } else {
        dirent::get_absolute(dirent_path)?
    };
    let encoded = uri_encode(&abs);

    Ok(match style {
        Style::Posix => format!("file://{encoded}"),
        Style::Dos => {
            if encoded.starts_with("//") {
                format!("file:{encoded}")
            } else {
                format!("file:///{encoded}")
            }
        }
    })
}

/// Extracts the dirent from a `file://` URL.
///
/// The host may only be empty or `localhost`, except under DOS rules where
/// a foreign host maps to a UNC prefix. Under DOS `/X:/...` and `/X|/...`
/// denote the `X` drive: the pipe is normalised to a colon, the leading
/// slash is stripped and the drive letter is uppercased.
///
/// # Errors
///
/// [`PathError::IllegalUrl`] on a malformed URL or an unsupported host.
pub fn dirent_from_file_url(style: Style, url: &str) -> PathResult<String> {
    if !url.starts_with("file://") {
        return Err(PathError::illegal_url(url, "does not contain 'file://' prefix"));
    }

    // Everything from the first '/' after the authority is the path;
    // "file://" alone reads as "file:///".
    let rest = &url[7..];
    let (host_raw, path_raw) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };

    let hostname = if host_raw.is_empty() {
        None
    } else {
        let decoded = uri_decode(host_raw)?;
        (decoded != "localhost").then_some(decoded)
    };

    let path = uri_decode(path_raw)?;

    match style {
        Style::Posix => {
            if hostname.is_some() {
                return Err(PathError::illegal_url(url, "contains unsupported hostname"));
            }
            Ok(path)
        }
        Style::Dos => {
            if let Some(host) = hostname {
                if path == "/" {
                    return Err(PathError::illegal_url(url, "contains only a hostname, no path"));
                }
                return Ok(format!("//{host}{path}"));
            }

            let b = path.as_bytes();
            if b.len() >= 3 && b[1].is_ascii_alphabetic() && (b[2] == b':' || b[2] == b'|') {
                let drive = b[1].to_ascii_uppercase() as char;
                let tail = &path[3..];
                if tail.is_empty() {
                    // "C:" alone would resolve against the drive's current
                    // directory; the drive root needs its slash.
                    return Ok(format!("{drive}:/"));
                }
                return Ok(format!("{drive}:{tail}"));
            }
            Ok(path)
        }
    }
}

fn previous_segment_len(uri: &str) -> usize {
    let u = uri.as_bytes();
    if u.is_empty() {
        return 0;
    }
    let root_length = canon::uri_schema_root_length(uri);
    let len = u.len();
    let mut i = len - 1;
    while len > root_length && i > 0 && u[i] != b'/' {
        i -= 1;
    }
    if i == 0 && len > 1 && u[0] == b'/' {
        return 1;
    }
    i
}
