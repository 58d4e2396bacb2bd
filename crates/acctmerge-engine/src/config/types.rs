//! Configuration types for a merge run.

use std::time::Duration;

use serde::Deserialize;

/// Account service root used when none is configured.
pub const DEFAULT_URL: &str = "http://interview.wpengine.io/";
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings loaded from the YAML config file.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Root URL of the account service.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum account lookups in flight at once.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MergeConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Apply command-line (or environment) overrides on top of file values.
    #[must_use]
    pub fn with_overrides(mut self, url: Option<String>, max_concurrent_requests: Option<usize>) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(n) = max_concurrent_requests {
            self.max_concurrent_requests = n;
        }
        self
    }
}
