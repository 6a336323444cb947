use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Time-related constants
// =============================================================================

/// Minimum time between automatic checks in milliseconds (6 hours)
pub const AUTO_CHECK_INTERVAL_MS: i64 = 6 * 60 * 60 * 1000;

/// Timeout for a single npm registry request in milliseconds
pub const NPM_FETCH_TIMEOUT_MS: u64 = 4_500;

/// Timeout for a single `git ls-remote` invocation in milliseconds
pub const GIT_LS_REMOTE_TIMEOUT_MS: u64 = 10_000;

/// Default base URL for the npm registry
pub const DEFAULT_NPM_BASE_URL: &str = "https://registry.npmjs.org";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub registry: RegistryConfig,
    pub timeouts: TimeoutConfig,
    pub auto_check: AutoCheckConfig,
}

/// Remote registry endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub npm_base_url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            npm_base_url: DEFAULT_NPM_BASE_URL.to_string(),
        }
    }
}

/// Per-call timeouts in milliseconds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    pub npm_ms: u64,
    pub git_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            npm_ms: NPM_FETCH_TIMEOUT_MS,
            git_ms: GIT_LS_REMOTE_TIMEOUT_MS,
        }
    }
}

/// Automatic check throttling
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCheckConfig {
    /// Minimum interval between automatic checks in milliseconds
    pub interval_ms: i64,
}

impl Default for AutoCheckConfig {
    fn default() -> Self {
        Self {
            interval_ms: AUTO_CHECK_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file is not an error. A file that cannot be read or parsed
    /// is logged and replaced by the defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Failed to read config {:?}: {}", path, e);
                return Self::default();
            }
        };

        serde_json::from_str(&content)
            .inspect_err(|e| warn!("Ignoring malformed config {:?}: {}", path, e))
            .unwrap_or_default()
    }
}

/// Returns the path to the data directory for pin-updates.
/// Uses $XDG_DATA_HOME/pin-updates if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/pin-updates,
/// or ./pin-updates if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("pin-updates.log")
}

/// Returns the path of the user-global settings layer.
pub fn global_settings_path() -> PathBuf {
    home_or_current().join(".pi").join("agent").join("settings.json")
}

/// Returns the path of the project settings layer for `cwd`.
pub fn project_settings_path(cwd: &Path) -> PathBuf {
    cwd.join(".pi").join("settings.json")
}

/// Returns the path of the persisted auto-check timestamp.
pub fn auto_check_cache_path() -> PathBuf {
    home_or_current()
        .join(".pi")
        .join("agent")
        .join(".cache")
        .join("package-update-notify.json")
}

fn home_or_current() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("pin-updates")
}
