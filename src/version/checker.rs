//! Update detection for pinned packages

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::parser::git_url::build_compare_url;
use crate::parser::types::{GitSpec, NpmSpec, PackageSpec};
use crate::version::compare::{compare_version, is_pinned_sha, same_sha, short_sha};
use crate::version::git::{fetch_latest_git_sha, resolve_git_ref};
use crate::version::registry::{GitRemote, Registry};

/// A package with a newer upstream version or commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdate {
    pub name: String,
    /// Display-formatted current pin (version, short sha or `ref (sha)`)
    pub current: String,
    /// Display-formatted upstream state
    pub latest: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_url: Option<String>,
}

/// Aggregated result of one check cycle
///
/// Every spec lands in at most one bucket; up-to-date specs land in none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub updates: Vec<PackageUpdate>,
    pub skipped_unpinned: Vec<String>,
    pub errors: Vec<String>,
}

/// Outcome of checking a single spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecOutcome {
    UpToDate,
    Update(PackageUpdate),
    Unpinned(String),
    Failed(String),
}

impl FromIterator<SpecOutcome> for CheckResult {
    fn from_iter<I: IntoIterator<Item = SpecOutcome>>(iter: I) -> Self {
        let mut result = CheckResult::default();
        for outcome in iter {
            match outcome {
                SpecOutcome::UpToDate => {}
                SpecOutcome::Update(update) => result.updates.push(update),
                SpecOutcome::Unpinned(name) => result.skipped_unpinned.push(name),
                SpecOutcome::Failed(message) => result.errors.push(message),
            }
        }
        result
    }
}

/// Resolves upstream state for pinned packages
pub struct UpdateChecker {
    registry: Arc<dyn Registry>,
    git: Arc<dyn GitRemote>,
}

impl UpdateChecker {
    pub fn new(registry: Arc<dyn Registry>, git: Arc<dyn GitRemote>) -> Self {
        Self { registry, git }
    }

    /// Check every spec concurrently and aggregate the outcomes.
    ///
    /// Never fails: a spec whose remote cannot be queried is reported in
    /// `errors` without affecting the others. Bucket order follows `specs`.
    pub async fn check_updates(&self, specs: &[PackageSpec]) -> CheckResult {
        info!(
            "Checking {} packages for updates ({} pinned)",
            specs.len(),
            specs.iter().filter(|spec| spec.is_pinned()).count()
        );

        let outcomes = join_all(specs.iter().map(|spec| self.check_spec(spec))).await;
        let result: CheckResult = outcomes.into_iter().collect();

        info!(
            "Check finished: {} updates, {} unpinned, {} errors",
            result.updates.len(),
            result.skipped_unpinned.len(),
            result.errors.len()
        );

        result
    }

    /// Check a single spec
    pub async fn check_spec(&self, spec: &PackageSpec) -> SpecOutcome {
        let Some(pinned) = spec.pinned() else {
            debug!("{} is not pinned", spec.source());
            return SpecOutcome::Unpinned(spec.display_name().to_string());
        };

        match spec {
            PackageSpec::Npm(npm) => self.check_npm(npm, pinned).await,
            PackageSpec::Git(git) => self.check_git(git, pinned).await,
        }
    }

    async fn check_npm(&self, spec: &NpmSpec, current: &str) -> SpecOutcome {
        let latest = match self.registry.fetch_latest_version(&spec.name).await {
            Ok(latest) => latest,
            Err(e) => {
                warn!("Failed to fetch latest version of {}: {}", spec.name, e);
                return SpecOutcome::Failed(format!("Failed to check {}", spec.name));
            }
        };

        if compare_version(&latest, current).is_gt() {
            debug!("{} {} -> {}", spec.name, current, latest);
            SpecOutcome::Update(PackageUpdate {
                name: spec.name.clone(),
                current: current.to_string(),
                latest,
                source: spec.source.clone(),
                compare_url: None,
            })
        } else {
            SpecOutcome::UpToDate
        }
    }

    async fn check_git(&self, spec: &GitSpec, git_ref: &str) -> SpecOutcome {
        if is_pinned_sha(git_ref) {
            self.check_git_sha(spec, git_ref).await
        } else {
            self.check_git_named_ref(spec, git_ref).await
        }
    }

    async fn check_git_sha(&self, spec: &GitSpec, pinned: &str) -> SpecOutcome {
        let head = match fetch_latest_git_sha(self.git.as_ref(), &spec.url).await {
            Ok(head) => head,
            Err(e) => {
                warn!("Failed to fetch HEAD of {}: {}", spec.url, e);
                return SpecOutcome::Failed(format!("Failed to check {}", spec.display_name));
            }
        };

        if same_sha(pinned, &head) {
            return SpecOutcome::UpToDate;
        }

        SpecOutcome::Update(PackageUpdate {
            name: spec.display_name.clone(),
            current: short_sha(pinned).to_string(),
            latest: short_sha(&head).to_string(),
            source: spec.source.clone(),
            compare_url: build_compare_url(&spec.url, pinned, &head),
        })
    }

    async fn check_git_named_ref(&self, spec: &GitSpec, name: &str) -> SpecOutcome {
        let remote = self.git.as_ref();
        let (resolved, head) = tokio::join!(
            resolve_git_ref(remote, &spec.url, name),
            fetch_latest_git_sha(remote, &spec.url)
        );

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Failed to resolve {}@{}: {}", spec.url, name, e);
                return SpecOutcome::Failed(format!(
                    "Failed to resolve {}@{}",
                    spec.display_name, name
                ));
            }
        };

        let head = match head {
            Ok(head) => head,
            Err(e) => {
                warn!("Failed to fetch HEAD of {}: {}", spec.url, e);
                return SpecOutcome::Failed(format!("Failed to check {}", spec.display_name));
            }
        };

        debug!(
            "{}@{} resolved as {:?} to {}",
            spec.display_name, name, resolved.kind, resolved.sha
        );

        if same_sha(&resolved.sha, &head) {
            return SpecOutcome::UpToDate;
        }

        SpecOutcome::Update(PackageUpdate {
            name: spec.display_name.clone(),
            current: format!("{} ({})", name, short_sha(&resolved.sha)),
            latest: format!("HEAD ({})", short_sha(&head)),
            source: spec.source.clone(),
            compare_url: build_compare_url(&spec.url, &resolved.sha, &head),
        })
    }
}
