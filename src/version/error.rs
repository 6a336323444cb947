use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cache record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timed out after {timeout_ms} ms: {target}")]
    Timeout { target: String, timeout_ms: u64 },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to spawn git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
}
