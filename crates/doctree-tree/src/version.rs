//! Version segment detection and ordering.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

/// A path segment starting with `N.N` (optionally `N.N.N...`) marks the root
/// of a version subtree. Suffixes after the numeric prefix (e.g. `-beta`) are
/// allowed and ignored here.
static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+").expect("version pattern compiles"));

/// Whether a path segment looks like a semantic version.
#[must_use]
pub fn is_version_segment(segment: &str) -> bool {
    VERSION_SEGMENT.is_match(segment)
}

/// Compare two version keys for descending order (newest first).
///
/// Versions are compared segment-wise on `.`-separated numeric parts; missing
/// segments count as 0 and non-numeric parts parse as 0. This deliberately
/// ignores pre-release suffixes (`1.0.0-beta` sorts with `1.0.0`).
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<u64> = a.split('.').map(|p| p.parse().unwrap_or(0)).collect();
    let b_parts: Vec<u64> = b.split('.').map(|p| p.parse().unwrap_or(0)).collect();

    for i in 0..a_parts.len().max(b_parts.len()) {
        let a_part = a_parts.get(i).copied().unwrap_or(0);
        let b_part = b_parts.get(i).copied().unwrap_or(0);
        match b_part.cmp(&a_part) {
            Ordering::Equal => {}
            other => return other,
        }
    }

    Ordering::Equal
}
