//! Traits for querying upstream state of pinned packages

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for fetching the latest published version from a package registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches the version currently tagged as latest
    ///
    /// # Arguments
    /// * `package_name` - The package name (e.g., "left-pad", "@scope/pkg")
    ///
    /// # Returns
    /// * `Ok(String)` - The latest version
    /// * `Err(RegistryError)` - If the version could not be determined
    ///   (unknown package, non-success status, network failure or timeout)
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}

/// Trait for listing references of a git remote
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait GitRemote: Send + Sync {
    /// Resolves `reference` on the remote at `url` to a commit hash
    ///
    /// # Arguments
    /// * `url` - Fetchable remote URL
    /// * `reference` - Exact ref to list (e.g., "HEAD", "refs/tags/v1.0.0")
    ///
    /// # Returns
    /// * `Ok(String)` - The 40-hex commit hash of the first listed ref
    /// * `Err(RegistryError)` - If the ref does not exist or the remote
    ///   could not be queried in time
    async fn ls_remote(&self, url: &str, reference: &str) -> Result<String, RegistryError>;
}
