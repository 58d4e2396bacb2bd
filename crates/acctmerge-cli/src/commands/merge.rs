use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use acctmerge_engine::config::types::MergeConfig;
use acctmerge_engine::MergeEngine;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Execute the `merge` command: enrich `input` into a freshly created `output`.
///
/// The output file is removed again when the merge fails.
pub async fn execute(config: &MergeConfig, input: &Path, output: &Path) -> Result<()> {
    // 1. Wire the engine to the account service
    let client = super::build_client(config)?;
    let engine = MergeEngine::new(Arc::new(client))
        .with_max_concurrent_lookups(config.max_concurrent_requests);

    // 2. Open input, then create output last so no earlier failure leaves it behind
    let infile = File::open(input)
        .with_context(|| format!("could not open file `{}`", input.display()))?;
    let outfile = File::create(output)
        .with_context(|| format!("could not create file `{}`", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        url = config.url,
        max_concurrent_requests = engine.max_concurrent_lookups(),
        "Merge configured"
    );

    // 3. Interrupts stop dispatch; in-flight lookups still finish
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, draining in-flight lookups");
                cancel.cancel();
            }
        })
    };

    let result = engine.merge(infile, outfile, &cancel).await;
    interrupt.abort();

    // 4. Report, discarding partial output on failure
    match result {
        Ok(summary) => {
            println!("Merge '{}' completed successfully.", output.display());
            println!("  Rows read:       {}", summary.rows_read);
            println!("  Rows written:    {}", summary.rows_written);
            println!("  Rows enriched:   {}", summary.rows_enriched());
            println!("  Lookups failed:  {}", summary.lookups_failed);
            println!("  Duration:        {:.2}s", summary.duration_secs);
            Ok(())
        }
        Err(err) => {
            if let Err(rm_err) = std::fs::remove_file(output) {
                tracing::warn!(
                    output = %output.display(),
                    error = %rm_err,
                    "Could not remove partial output"
                );
            }
            Err(anyhow::Error::new(err).context("Could not stream data"))
        }
    }
}
