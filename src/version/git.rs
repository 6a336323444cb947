//! Ref resolution on top of [`GitRemote`]

use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registry::GitRemote;

/// Kind of ref a pinned name resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Tag,
    Branch,
}

/// A named ref resolved to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub sha: String,
    pub kind: RefKind,
}

/// Commit at the tip of the remote's default branch
pub async fn fetch_latest_git_sha(
    remote: &dyn GitRemote,
    url: &str,
) -> Result<String, RegistryError> {
    remote.ls_remote(url, "HEAD").await
}

/// Resolve a tag or branch name to a commit.
///
/// `refs/tags/<name>` is probed before `refs/heads/<name>`, so a tag and a
/// branch sharing a name always resolve as the tag. The tie-break is
/// arbitrary; callers must not rely on it meaning anything more.
pub async fn resolve_git_ref(
    remote: &dyn GitRemote,
    url: &str,
    name: &str,
) -> Result<ResolvedRef, RegistryError> {
    match remote.ls_remote(url, &format!("refs/tags/{name}")).await {
        Ok(sha) => {
            return Ok(ResolvedRef {
                sha,
                kind: RefKind::Tag,
            });
        }
        Err(e) => debug!("{} has no tag {}: {}", url, name, e),
    }

    let sha = remote.ls_remote(url, &format!("refs/heads/{name}")).await?;
    Ok(ResolvedRef {
        sha,
        kind: RefKind::Branch,
    })
}
