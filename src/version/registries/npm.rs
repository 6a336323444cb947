//! npm registry API implementation

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_NPM_BASE_URL, NPM_FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// Response from the `/<package>/latest` endpoint
#[derive(Debug, Deserialize)]
struct NpmLatestResponse {
    version: Option<String>,
}

/// Registry implementation for the npm registry API
#[derive(Clone)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL and per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("pin-updates")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Percent-encode a package name as a single path segment
    /// (`@scope/pkg` -> `%40scope%2Fpkg`)
    fn encode_package_name(package_name: &str) -> String {
        let mut encoded = String::with_capacity(package_name.len());
        for byte in package_name.bytes() {
            match byte {
                b'A'..=b'Z'
                | b'a'..=b'z'
                | b'0'..=b'9'
                | b'-'
                | b'_'
                | b'.'
                | b'!'
                | b'~'
                | b'*'
                | b'\''
                | b'('
                | b')' => encoded.push(char::from(byte)),
                _ => encoded.push_str(&format!("%{byte:02X}")),
            }
        }
        encoded
    }

    fn map_send_error(&self, url: &str, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout {
                target: url.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            RegistryError::Network(e)
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_NPM_BASE_URL,
            Duration::from_millis(NPM_FETCH_TIMEOUT_MS),
        )
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}/latest", self.base_url, encoded_name);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let latest: NpmLatestResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return self.map_send_error(&url, e);
            }
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        latest
            .version
            .filter(|version| !version.trim().is_empty())
            .ok_or_else(|| {
                RegistryError::InvalidResponse(format!(
                    "No version in response for {package_name}"
                ))
            })
    }
}
