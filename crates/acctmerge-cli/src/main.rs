mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "acctmerge",
    version,
    about = "Merges input account info with live status from the account service"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: $HOME/.acctmerge.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root URL of the account service
    #[arg(long, env = "ACCTMERGE_URL", global = true)]
    url: Option<String>,

    /// Maximum concurrent requests to make to the account service
    #[arg(long, env = "ACCTMERGE_MAX_CONCURRENT_REQUESTS", global = true)]
    max_concurrent_requests: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich an account CSV file with live status data
    Merge {
        /// Input CSV (Account ID,Account Name,First Name,Created On)
        input: PathBuf,
        /// Output CSV to create; removed again if the merge fails
        output: PathBuf,
    },
    /// List every account known to the account service
    Accounts,
    /// Validate configuration and account service connectivity
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    let config =
        commands::resolve_config(cli.config.as_deref(), cli.url, cli.max_concurrent_requests)?;

    match cli.command {
        Commands::Merge { input, output } => {
            commands::merge::execute(&config, &input, &output).await
        }
        Commands::Accounts => commands::accounts::execute(&config).await,
        Commands::Check => commands::check::execute(&config).await,
    }
}
