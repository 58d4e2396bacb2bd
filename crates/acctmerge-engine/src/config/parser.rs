//! Config YAML parsing with environment variable substitution and discovery.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::config::types::MergeConfig;

/// File name looked up in the home directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".acctmerge.yaml";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var regex"));

/// Substitute `${VAR_NAME}` patterns with environment variable values.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set.
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let mut missing = Vec::new();
    let result = ENV_VAR_RE.replace_all(input, |cap: &Captures<'_>| {
        std::env::var(&cap[1]).unwrap_or_else(|_| {
            missing.push(cap[1].to_string());
            String::new()
        })
    });

    if !missing.is_empty() {
        anyhow::bail!("Missing environment variable(s): {}", missing.join(", "));
    }

    Ok(result.into_owned())
}

/// Parse a config YAML string (after env var substitution).
///
/// An empty document yields the default config.
///
/// # Errors
///
/// Returns an error if env var substitution fails or the YAML is invalid.
pub fn parse_config_str(yaml_str: &str) -> Result<MergeConfig> {
    let substituted = substitute_env_vars(yaml_str)?;
    if substituted.trim().is_empty() {
        return Ok(MergeConfig::default());
    }
    serde_yaml::from_str(&substituted).context("Failed to parse config YAML")
}

/// Parse a config YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is invalid.
pub fn parse_config(path: &Path) -> Result<MergeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// `$HOME/.acctmerge.yaml`, if a home directory can be determined.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE))
}

/// Load the effective config file.
///
/// An explicit path must exist. Without one, the home-directory default is
/// used when present, and built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<MergeConfig> {
    if let Some(path) = explicit {
        return parse_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            tracing::info!(path = %path.display(), "Using config file");
            parse_config(&path)
        }
        _ => Ok(MergeConfig::default()),
    }
}
