pub mod accounts;
pub mod check;
pub mod merge;

use std::path::Path;

use acctmerge_client::HttpAccountClient;
use acctmerge_engine::config::parser;
use acctmerge_engine::config::types::MergeConfig;
use acctmerge_engine::config::validator;
use anyhow::{Context, Result};

/// Load the config file, apply flag/env overrides, and validate the result.
pub fn resolve_config(
    config_path: Option<&Path>,
    url: Option<String>,
    max_concurrent_requests: Option<usize>,
) -> Result<MergeConfig> {
    let config = parser::load_config(config_path)?.with_overrides(url, max_concurrent_requests);
    validator::validate_config(&config)?;
    Ok(config)
}

fn build_client(config: &MergeConfig) -> Result<HttpAccountClient> {
    HttpAccountClient::new(&config.url, config.request_timeout())
        .context("Failed to create account service client")
}
