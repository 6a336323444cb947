//! Version and commit comparison helpers
//!
//! Versions are compared as dotted numbers without a full semver
//! implementation. Schemes that are not purely numeric degrade to plain
//! string ordering.

use std::cmp::Ordering;

/// Length of a full git commit hash in hex characters
const SHA_LEN: usize = 40;

/// Length of an abbreviated commit hash used for display
const SHORT_SHA_LEN: usize = 7;

/// Trim whitespace and drop a leading `v`
pub fn normalize_version(version: &str) -> &str {
    let trimmed = version.trim();
    trimmed.strip_prefix('v').unwrap_or(trimmed)
}

/// Compare two dotted version strings.
///
/// Pre-release and build suffixes after `-` are ignored, missing trailing
/// components count as `0` (`1.2` equals `1.2.0`). Numeric components have no
/// size limit. If either side has a non-numeric component both stripped
/// strings are compared bytewise.
pub fn compare_version(a: &str, b: &str) -> Ordering {
    let a = release_part(a);
    let b = release_part(b);

    match (numeric_components(a), numeric_components(b)) {
        (Some(pa), Some(pb)) => {
            let len = pa.len().max(pb.len());
            (0..len)
                .map(|i| {
                    let av = pa.get(i).copied().unwrap_or_default();
                    let bv = pb.get(i).copied().unwrap_or_default();
                    compare_digits(av, bv)
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }
        _ => a.cmp(b),
    }
}

/// Returns true iff `git_ref` is exactly 40 hex characters (any case)
pub fn is_pinned_sha(git_ref: &str) -> bool {
    git_ref.len() == SHA_LEN && git_ref.chars().all(|c| c.is_ascii_hexdigit())
}

/// First 7 characters of a commit hash
pub fn short_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}

/// Case-insensitive commit equality
pub fn same_sha(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn release_part(version: &str) -> &str {
    let normalized = normalize_version(version);
    normalized.split('-').next().unwrap_or(normalized)
}

/// Split into digit-only components with leading zeros removed
/// (`0` becomes the empty string)
fn numeric_components(version: &str) -> Option<Vec<&str>> {
    version
        .split('.')
        .map(|part| {
            (!part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
                .then(|| part.trim_start_matches('0'))
        })
        .collect()
}

/// Compare zero-stripped digit strings by magnitude
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
