//! Remote implementations for resolving upstream state

pub mod git;
pub mod npm;

pub use git::GitCli;
pub use npm::NpmRegistry;
