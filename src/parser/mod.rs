//! Parser layer
//! - types.rs: Parsed spec types (PackageSpec, NpmSpec, GitSpec)
//! - source.rs: Source string parser
//! - git_url.rs: Git URL normalization, display names, compare links
//! - settings.rs: Settings layers and merging

pub mod git_url;
pub mod settings;
pub mod source;
pub mod types;

pub use settings::{SettingsFile, SettingsPackage, extract_packages, merge_packages};
pub use source::parse_source;
pub use types::{GitSpec, NpmSpec, PackageSpec};
