//! Semantic validation for parsed merge configuration values.

use anyhow::{bail, Result};

use crate::config::types::MergeConfig;

/// Validate a merge configuration.
/// Returns `Ok(())` if valid, Err with all validation errors if not.
///
/// # Errors
///
/// Returns an error listing all validation failures found in the config.
pub fn validate_config(config: &MergeConfig) -> Result<()> {
    let mut errors = Vec::new();

    if let Err(e) = acctmerge_client::parse_base_url(&config.url) {
        errors.push(e.to_string());
    }

    if config.max_concurrent_requests == 0 {
        errors.push("max_concurrent_requests must be at least 1".to_string());
    }

    if config.request_timeout_secs == 0 {
        errors.push("request_timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        bail!("Config validation failed:\n  - {}", errors.join("\n  - "))
    }
}
