//! Upstream resolution layer for pinned packages
//!
//! This module queries remote registries and git remotes, compares the
//! results against the pinned versions and throttles automatic checks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Checker   │◀────│  GitRemote  │
//! │ (npm fetch) │     │ (aggregate) │     │ (ls-remote) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Compare   │
//!                     │(version/sha)│
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Persisted auto-check timestamp and throttle
//! - [`checker`]: Concurrent update detection over a spec list
//! - [`compare`]: Dotted version comparison and commit hash helpers
//! - [`git`]: Tag/branch resolution on top of [`registry::GitRemote`]
//! - [`registry`]: Traits for querying registries and git remotes
//! - [`registries`]: Concrete implementations (npm HTTP API, `git` CLI)
//! - [`error`]: Error types for cache and registry operations

pub mod cache;
pub mod checker;
pub mod compare;
pub mod error;
pub mod git;
pub mod registries;
pub mod registry;
