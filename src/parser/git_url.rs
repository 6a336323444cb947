//! Git remote URL normalization and display helpers

use std::sync::LazyLock;

use regex::Regex;

/// `http://`, `https://`, `ssh://` or `git://`
static ABSOLUTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?|ssh|git)://").unwrap());

/// scp-style shorthand: `git@host:path`
static SSH_SHORTHAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@([^:]+):(.+)$").unwrap());

/// `host/org/repo`
static HOST_ORG_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/:]+/[^/]+/[^/]+$").unwrap());

/// `org/repo`
static ORG_REPO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^/:]+/[^/]+$").unwrap());

/// Path portion of an absolute URL (everything after `host/`)
static ABSOLUTE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^/]+/(.+)$").unwrap());

static GITHUB_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[/:]([^/]+/[^/]+)").unwrap());

/// Default host for `org/repo` shorthand
const DEFAULT_GIT_HOST: &str = "github.com";

/// Returns true for URLs with an explicit `http(s)://`, `ssh://` or `git://` scheme
pub fn is_absolute_git_url(url: &str) -> bool {
    ABSOLUTE_URL_RE.is_match(url)
}

/// Canonicalize a git remote into a fetchable URL.
///
/// - absolute URLs are returned unchanged
/// - `git@host:org/repo.git` becomes `https://host/org/repo.git`
/// - `host/org/repo` becomes `https://host/org/repo`
/// - `org/repo` becomes `https://github.com/org/repo`
///
/// Anything else passes through untouched; an unusable URL surfaces later
/// as a fetch failure rather than a parse failure.
pub fn normalize_git_url(url: &str) -> String {
    if is_absolute_git_url(url) {
        return url.to_string();
    }

    if let Some(caps) = SSH_SHORTHAND_RE.captures(url) {
        return format!("https://{}/{}", &caps[1], &caps[2]);
    }

    if HOST_ORG_REPO_RE.is_match(url) {
        return format!("https://{url}");
    }

    if ORG_REPO_RE.is_match(url) {
        return format!("https://{DEFAULT_GIT_HOST}/{url}");
    }

    url.to_string()
}

/// Extract a short `org/repo` style name for display
pub fn extract_display_name(url: &str) -> String {
    if let Some(caps) = SSH_SHORTHAND_RE.captures(url) {
        return caps[2].to_string();
    }

    if let Some(caps) = ABSOLUTE_PATH_RE.captures(url) {
        return caps[1].to_string();
    }

    url.to_string()
}

/// Build a GitHub compare link between two commits.
///
/// Only GitHub-hosted repositories get a link; other hosts return `None`.
pub fn build_compare_url(url: &str, current: &str, latest: &str) -> Option<String> {
    let caps = GITHUB_REPO_RE.captures(url)?;
    let repo = caps[1].strip_suffix(".git").unwrap_or(&caps[1]);
    Some(format!(
        "https://github.com/{repo}/compare/{current}...{latest}"
    ))
}
