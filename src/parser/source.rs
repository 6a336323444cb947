//! Parser for raw pin source strings
//!
//! Recognized forms:
//! - `npm:<name>[@<version>]`, where `<name>` may be scoped (`@scope/pkg`)
//! - `git:<remote>[@<ref>]`, where `<remote>` is anything [`normalize_git_url`] accepts
//! - `https://…`, `http://…`, `ssh://…`, `git://…` with an optional trailing `@<ref>`
//!
//! Local filesystem paths and unrecognized strings yield no spec.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::git_url::{extract_display_name, is_absolute_git_url, normalize_git_url};
use crate::parser::types::{GitSpec, NpmSpec, PackageSpec};

/// Package name (optionally scoped) followed by an optional `@version`
static NPM_SOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(@?[^@]+(?:/[^@]+)?)(?:@(.+))?$").unwrap());

const NPM_PREFIX: &str = "npm:";
const GIT_PREFIX: &str = "git:";

/// Parse a raw source string into a typed spec.
///
/// The npm prefix is tried first, then the git forms.
pub fn parse_source(source: &str) -> Option<PackageSpec> {
    if is_local_path(source) {
        return None;
    }

    if let Some(spec) = parse_npm_source(source) {
        return Some(PackageSpec::Npm(spec));
    }

    parse_git_source(source).map(PackageSpec::Git)
}

/// Returns true for sources pointing at the local filesystem
pub fn is_local_path(source: &str) -> bool {
    source.starts_with('/') || source.starts_with("./") || source.starts_with("..")
}

/// Parse an `npm:` source
pub fn parse_npm_source(source: &str) -> Option<NpmSpec> {
    let spec = source.strip_prefix(NPM_PREFIX)?.trim();
    let caps = NPM_SOURCE_RE.captures(spec)?;

    Some(NpmSpec {
        name: caps[1].to_string(),
        version: caps.get(2).map(|m| m.as_str().to_string()),
        source: source.to_string(),
    })
}

/// Parse a `git:` prefixed source or an absolute git URL
pub fn parse_git_source(source: &str) -> Option<GitSpec> {
    let location = if is_absolute_git_url(source) {
        source
    } else {
        source.strip_prefix(GIT_PREFIX)?.trim()
    };

    if location.is_empty() {
        return None;
    }

    let (raw_url, git_ref) = split_ref(location);
    let display_name = extract_display_name(raw_url);

    Some(GitSpec {
        url: normalize_git_url(raw_url),
        git_ref: git_ref.map(String::from),
        source: source.to_string(),
        display_name,
    })
}

/// Split `<remote>@<ref>` on the last `@` that follows the host part.
///
/// User-info separators (`git@host:…`, `ssh://git@host/…`) are never taken
/// for a ref separator. An empty ref or an empty remote means there is no ref.
fn split_ref(location: &str) -> (&str, Option<&str>) {
    let path_start = path_start(location);

    let Some(idx) = location[path_start..].rfind('@') else {
        return (location, None);
    };

    let at = path_start + idx;
    let (url, git_ref) = (&location[..at], &location[at + 1..]);
    if url.is_empty() || git_ref.is_empty() {
        return (location, None);
    }

    (url, Some(git_ref))
}

/// Byte offset where the repository path begins
fn path_start(location: &str) -> usize {
    if let Some(scheme_end) = location.find("://") {
        let authority = scheme_end + "://".len();
        return location[authority..]
            .find('/')
            .map_or(location.len(), |idx| authority + idx);
    }

    // scp-style `user@host:path`: the colon comes before any slash
    match (location.find(':'), location.find('/')) {
        (Some(colon), Some(slash)) if colon < slash => colon,
        (Some(colon), None) => colon,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("npm:left-pad@1.3.0", "left-pad", Some("1.3.0"))]
    #[case("npm:left-pad", "left-pad", None)]
    #[case("npm:@scope/pkg@1.2.3", "@scope/pkg", Some("1.2.3"))]
    #[case("npm:@scope/pkg", "@scope/pkg", None)]
    #[case("npm: spaced@2.0.0 ", "spaced", Some("2.0.0"))]
    #[case("npm:pkg@1.0.0-beta.1", "pkg", Some("1.0.0-beta.1"))]
    fn parse_npm_source_returns_name_and_version(
        #[case] source: &str,
        #[case] name: &str,
        #[case] version: Option<&str>,
    ) {
        let spec = parse_npm_source(source).unwrap();

        assert_eq!(spec.name, name);
        assert_eq!(spec.version.as_deref(), version);
        assert_eq!(spec.source, source);
    }

    #[rstest]
    #[case("npm:")]
    #[case("npm:pkg@")]
    #[case("left-pad@1.0.0")]
    fn parse_npm_source_rejects_invalid(#[case] source: &str) {
        assert_eq!(parse_npm_source(source), None);
    }

    #[rstest]
    #[case(
        "git:github.com/org/repo@main",
        "https://github.com/org/repo",
        Some("main"),
        "github.com/org/repo"
    )]
    #[case("git:org/repo", "https://github.com/org/repo", None, "org/repo")]
    #[case(
        "git:git@github.com:org/repo.git@v1.2.0",
        "https://github.com/org/repo.git",
        Some("v1.2.0"),
        "org/repo.git"
    )]
    #[case(
        "git:git@github.com:org/repo.git",
        "https://github.com/org/repo.git",
        None,
        "org/repo.git"
    )]
    #[case(
        "https://gitlab.com/group/repo@feature/x",
        "https://gitlab.com/group/repo",
        Some("feature/x"),
        "group/repo"
    )]
    #[case(
        "ssh://git@github.com/org/repo.git",
        "ssh://git@github.com/org/repo.git",
        None,
        "org/repo.git"
    )]
    #[case(
        "ssh://git@github.com/org/repo.git@0123456789abcdef0123456789abcdef01234567",
        "ssh://git@github.com/org/repo.git",
        Some("0123456789abcdef0123456789abcdef01234567"),
        "org/repo.git"
    )]
    #[case(
        "git://example.com/org/repo@v2",
        "git://example.com/org/repo",
        Some("v2"),
        "org/repo"
    )]
    #[case("git:org/repo@", "https://github.com/org/repo@", None, "org/repo@")]
    fn parse_git_source_returns_expected(
        #[case] source: &str,
        #[case] url: &str,
        #[case] git_ref: Option<&str>,
        #[case] display_name: &str,
    ) {
        let spec = parse_git_source(source).unwrap();

        assert_eq!(spec.url, url);
        assert_eq!(spec.git_ref.as_deref(), git_ref);
        assert_eq!(spec.display_name, display_name);
        assert_eq!(spec.source, source);
    }

    #[rstest]
    #[case("git:")]
    #[case("github.com/org/repo")]
    #[case("ftp://example.com/repo")]
    fn parse_git_source_rejects_unsupported(#[case] source: &str) {
        assert_eq!(parse_git_source(source), None);
    }

    #[test]
    fn parse_source_yields_scoped_npm_spec() {
        assert_eq!(
            parse_source("npm:@scope/pkg@1.2.3"),
            Some(PackageSpec::Npm(NpmSpec {
                name: "@scope/pkg".to_string(),
                version: Some("1.2.3".to_string()),
                source: "npm:@scope/pkg@1.2.3".to_string(),
            }))
        );
    }

    #[rstest]
    #[case("./local/dir")]
    #[case("/abs/path")]
    #[case("../sibling")]
    #[case("some-random-string")]
    #[case("")]
    fn parse_source_drops_local_paths_and_unknown_forms(#[case] source: &str) {
        assert_eq!(parse_source(source), None);
    }

    #[test]
    fn parse_source_prefers_npm_prefix() {
        assert!(matches!(
            parse_source("npm:git-thing@1.0.0"),
            Some(PackageSpec::Npm(_))
        ));
    }

    #[test]
    fn parse_source_treats_git_scheme_as_absolute_url() {
        let Some(PackageSpec::Git(spec)) = parse_source("git://host.example/org/repo") else {
            panic!("expected git spec");
        };

        assert_eq!(spec.url, "git://host.example/org/repo");
        assert_eq!(spec.git_ref, None);
    }
}
