//! Persisted "last automatic check" timestamp and the throttle built on it

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::version::error::CacheError;

/// Single persisted record; overwritten on every mark, never appended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoCheckCache {
    /// Milliseconds since UNIX epoch of the last automatic check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<i64>,
}

/// Trait for reading and writing the auto-check record
#[cfg_attr(test, automock)]
pub trait AutoCheckStore: Send + Sync {
    /// Read the record. A missing record is `Ok(AutoCheckCache::default())`.
    fn read(&self) -> Result<AutoCheckCache, CacheError>;

    /// Replace the record
    fn write(&self, cache: &AutoCheckCache) -> Result<(), CacheError>;
}

/// Stores the record as a small JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl AutoCheckStore for JsonFileStore {
    fn read(&self) -> Result<AutoCheckCache, CacheError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AutoCheckCache::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, cache: &AutoCheckCache) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(cache)?)?;
        debug!("Wrote auto-check record to {:?}", self.path);
        Ok(())
    }
}

/// Get current timestamp in milliseconds since UNIX epoch
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whether an automatic check is due at `now`.
///
/// True iff at least `interval_ms` elapsed since the recorded check. A missing
/// or unreadable record counts as never checked.
pub fn should_run_auto_check<S: AutoCheckStore + ?Sized>(
    store: &S,
    now: i64,
    interval_ms: i64,
) -> bool {
    let cache = store
        .read()
        .inspect_err(|e| warn!("Failed to read auto-check record: {}", e))
        .unwrap_or_default();

    let last_checked_at = cache.last_checked_at.unwrap_or(0);
    let due = now.saturating_sub(last_checked_at) >= interval_ms;

    if !due {
        info!(
            "Skipping automatic check: last run at {}, interval {} ms",
            last_checked_at, interval_ms
        );
    }

    due
}

/// Record `now` as the time of the last check.
///
/// Write failures are logged and otherwise ignored.
pub fn mark_auto_check<S: AutoCheckStore + ?Sized>(store: &S, now: i64) {
    let cache = AutoCheckCache {
        last_checked_at: Some(now),
    };
    if let Err(e) = store.write(&cache) {
        warn!("Failed to write auto-check record: {}", e);
    }
}
