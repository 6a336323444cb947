//! Fake remotes for end-to-end tests

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use pin_updates::version::error::RegistryError;
use pin_updates::version::registry::{GitRemote, Registry};

/// In-memory npm registry with optional per-package latency.
/// Lookups slower than `timeout` fail the same way a real request would.
pub struct FakeRegistry {
    latest: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    timeout: Duration,
}

impl FakeRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            latest: HashMap::new(),
            delays: HashMap::new(),
            timeout,
        }
    }

    pub fn with_latest(mut self, package: &str, version: &str) -> Self {
        self.latest.insert(package.to_string(), version.to_string());
        self
    }

    pub fn with_delay(mut self, package: &str, delay: Duration) -> Self {
        self.delays.insert(package.to_string(), delay);
        self
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let delay = self.delays.get(package_name).copied().unwrap_or_default();
        tokio::time::timeout(self.timeout, tokio::time::sleep(delay))
            .await
            .map_err(|_| RegistryError::Timeout {
                target: package_name.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap(),
            })?;

        self.latest
            .get(package_name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(package_name.to_string()))
    }
}

/// In-memory git remote keyed by (url, ref)
#[derive(Default)]
pub struct FakeGitRemote {
    refs: HashMap<(String, String), String>,
}

impl FakeGitRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ref(mut self, url: &str, reference: &str, sha: &str) -> Self {
        self.refs
            .insert((url.to_string(), reference.to_string()), sha.to_string());
        self
    }
}

#[async_trait]
impl GitRemote for FakeGitRemote {
    async fn ls_remote(&self, url: &str, reference: &str) -> Result<String, RegistryError> {
        self.refs
            .get(&(url.to_string(), reference.to_string()))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(format!("{url} {reference}")))
    }
}
