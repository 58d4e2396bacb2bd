use acctmerge_client::AccountLookup;
use acctmerge_engine::config::types::MergeConfig;
use anyhow::Result;

/// Execute the `check` command: report config and check that the account service answers.
pub async fn execute(config: &MergeConfig) -> Result<()> {
    // 1. Config was validated while resolving it
    println!("Configuration:     OK");
    println!("  URL:                      {}", config.url);
    println!("  Max concurrent requests:  {}", config.max_concurrent_requests);
    println!("  Request timeout:          {}s", config.request_timeout_secs);

    // 2. Check connectivity through the listing endpoint
    let client = super::build_client(config)?;
    match client.list_accounts().await {
        Ok(accounts) => {
            println!("Account service:   OK ({} accounts)", accounts.len());
            println!("\nAll checks passed.");
            Ok(())
        }
        Err(err) => {
            println!("Account service:   FAILED");
            println!("  {err}");
            anyhow::bail!("One or more checks failed")
        }
    }
}
