//! Common types for parsed package pins

/// A package pinned to the npm registry (`npm:left-pad@1.3.0`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmSpec {
    /// Package name, optionally scoped (e.g., "left-pad", "@scope/pkg")
    pub name: String,
    /// Pinned version; `None` means the package is unpinned
    pub version: Option<String>,
    /// Raw source string the spec was parsed from
    pub source: String,
}

/// A package pinned to a git remote (`github.com/org/repo@main`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSpec {
    /// Normalized, fetchable remote URL
    pub url: String,
    /// Pinned ref: a 40-hex commit, a tag or a branch. `None` means unpinned.
    /// Which of the three it is gets decided later by probing the remote.
    pub git_ref: Option<String>,
    /// Raw source string the spec was parsed from
    pub source: String,
    /// Human readable name (e.g., "org/repo")
    pub display_name: String,
}

/// Parsed representation of one pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpec {
    Npm(NpmSpec),
    Git(GitSpec),
}

impl PackageSpec {
    /// Key used to deduplicate specs across settings layers
    /// (`npm:<name>` or `git:<normalized url>`)
    pub fn identity_key(&self) -> String {
        match self {
            PackageSpec::Npm(spec) => format!("npm:{}", spec.name),
            PackageSpec::Git(spec) => format!("git:{}", spec.url),
        }
    }

    /// Name shown to users in reports
    pub fn display_name(&self) -> &str {
        match self {
            PackageSpec::Npm(spec) => &spec.name,
            PackageSpec::Git(spec) => &spec.display_name,
        }
    }

    /// Raw source string the spec was parsed from
    pub fn source(&self) -> &str {
        match self {
            PackageSpec::Npm(spec) => &spec.source,
            PackageSpec::Git(spec) => &spec.source,
        }
    }

    /// Declared version (npm) or ref (git)
    pub fn pinned(&self) -> Option<&str> {
        match self {
            PackageSpec::Npm(spec) => spec.version.as_deref(),
            PackageSpec::Git(spec) => spec.git_ref.as_deref(),
        }
    }

    /// Whether a version or ref is declared
    pub fn is_pinned(&self) -> bool {
        self.pinned().is_some()
    }
}
