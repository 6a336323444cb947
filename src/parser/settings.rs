//! Settings layers: reading, extracting and merging package pins

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::parser::source::parse_source;
use crate::parser::types::PackageSpec;

/// Settings file as stored on disk. Only `packages` is of interest here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsFile {
    pub packages: Option<Vec<SettingsPackage>>,
}

/// One entry of the `packages` list
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SettingsPackage {
    /// Bare source string
    Source(String),
    /// Object carrying a `source` field
    Entry { source: Option<String> },
    /// Anything else is kept so one odd entry does not void the whole file
    Other(serde_json::Value),
}

impl SettingsPackage {
    fn source(&self) -> Option<&str> {
        match self {
            SettingsPackage::Source(source) => Some(source),
            SettingsPackage::Entry { source } => source.as_deref(),
            SettingsPackage::Other(_) => None,
        }
    }
}

/// Read a settings file.
///
/// A missing file, an unreadable file or invalid JSON all yield empty settings.
pub async fn read_settings(path: &Path) -> SettingsFile {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Settings file {:?} does not exist", path);
            return SettingsFile::default();
        }
        Err(e) => {
            warn!("Failed to read settings {:?}: {}", path, e);
            return SettingsFile::default();
        }
    };

    serde_json::from_str(&content)
        .inspect_err(|e| warn!("Failed to parse settings {:?}: {}", path, e))
        .unwrap_or_default()
}

/// Parse every package entry, dropping local paths and unrecognized sources
pub fn extract_packages(settings: &SettingsFile) -> Vec<PackageSpec> {
    settings
        .packages
        .iter()
        .flatten()
        .filter_map(SettingsPackage::source)
        .filter(|source| !source.is_empty())
        .filter_map(|source| {
            let spec = parse_source(source);
            if spec.is_none() {
                debug!("Skipping source {:?}: not a remote pin", source);
            }
            spec
        })
        .collect()
}

/// Merge the global and project layers.
///
/// Specs are keyed by [`PackageSpec::identity_key`]; a project entry replaces
/// a global entry with the same key and keeps the global entry's position.
pub fn merge_packages(global: Vec<PackageSpec>, project: Vec<PackageSpec>) -> Vec<PackageSpec> {
    let mut merged: IndexMap<String, PackageSpec> = IndexMap::new();

    for spec in global.into_iter().chain(project) {
        merged.insert(spec.identity_key(), spec);
    }

    merged.into_values().collect()
}

/// Read both settings layers concurrently and merge their pins
pub async fn load_merged_specs(global_path: &Path, project_path: &Path) -> Vec<PackageSpec> {
    let (global, project) = tokio::join!(read_settings(global_path), read_settings(project_path));

    merge_packages(extract_packages(&global), extract_packages(&project))
}
