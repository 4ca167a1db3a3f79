//! URL to filesystem path resolution.
//!
//! Alias rules rewrite the raw request path first; everything else maps
//! unchanged under the served root.
//!
//! Containment is lexical: any `..` segment is a 404 and is never collapsed
//! against the root, so `/textures/../../index.html` is not served as
//! `/index.html`. Symlinks inside the root are followed, including ones
//! pointing outside it.

use crate::config::AliasRule;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// What a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Regular file to send.
    File(PathBuf),
    /// Directory without an index file; `url_path` is the decoded request path.
    Listing { dir: PathBuf, url_path: String },
    /// Directory requested without trailing slash; value is the `Location`.
    Redirect(String),
    NotFound,
}

/// Rewrite `path` with the first alias rule whose prefix matches.
pub fn apply_alias<'a>(path: &'a str, rules: &[AliasRule]) -> Cow<'a, str> {
    for rule in rules {
        if let Some(rest) = path.strip_prefix(rule.prefix.as_str()) {
            return Cow::Owned(format!("{}{}", rule.target, rest));
        }
    }
    Cow::Borrowed(path)
}

/// Resolve a request target under `root`.
pub fn resolve(url: &str, root: &Path, rules: &[AliasRule]) -> Resolved {
    let (path, query) = split_target(url);

    let aliased = apply_alias(path, rules);
    let Some(decoded) = decode(&aliased) else {
        return Resolved::NotFound;
    };

    let relative = decoded.trim_start_matches('/');
    if !is_contained(relative) {
        return Resolved::NotFound;
    }

    let full = root.join(relative);
    // Follows symlinks
    let Ok(metadata) = fs::metadata(&full) else {
        return Resolved::NotFound;
    };

    if metadata.is_dir() {
        if !path.ends_with('/') {
            return Resolved::Redirect(format!("{path}/{query}"));
        }
        for index in ["index.html", "index.htm"] {
            let candidate = full.join(index);
            if candidate.is_file() {
                return Resolved::File(candidate);
            }
        }
        return Resolved::Listing {
            dir: full,
            url_path: decode(path).unwrap_or_default(),
        };
    }

    // A file addressed like a directory
    if path.ends_with('/') {
        return Resolved::NotFound;
    }

    if metadata.is_file() {
        Resolved::File(full)
    } else {
        Resolved::NotFound
    }
}

/// Whether `relative` stays under the directory it is joined to.
///
/// Only plain names and `.` are allowed; `..`, roots and drive prefixes are not.
fn is_contained(relative: &str) -> bool {
    !relative.split(['/', '\\']).any(|segment| segment == "..")
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Split a request target into the path and the `?query` part.
/// Fragments are dropped.
fn split_target(url: &str) -> (&str, &str) {
    let url = url.split('#').next().unwrap_or(url);
    match url.find('?') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

fn decode(path: &str) -> Option<String> {
    percent_decode_str(path)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}
