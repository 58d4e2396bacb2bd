use acctmerge_client::AccountLookup;
use acctmerge_engine::config::types::MergeConfig;
use anyhow::{Context, Result};

/// Execute the `accounts` command: list every account known to the service.
pub async fn execute(config: &MergeConfig) -> Result<()> {
    let client = super::build_client(config)?;

    let mut accounts = client
        .list_accounts()
        .await
        .context("Failed to list accounts")?;
    accounts.sort_by_key(|a| a.account_id);

    println!("Found {} account(s):\n", accounts.len());
    println!("{:>12}  {:<12}  {}", "Account ID", "Status", "Status Set On");
    for account in &accounts {
        println!(
            "{:>12}  {:<12}  {}",
            account.account_id, account.status, account.created_on
        );
    }
    println!();

    // Machine-readable JSON for scripting
    let json = serde_json::to_string(&accounts)?;
    println!("@@ACCOUNTS_JSON@@{json}");

    Ok(())
}
