pub mod remote;

pub use remote::{FakeGitRemote, FakeRegistry};
