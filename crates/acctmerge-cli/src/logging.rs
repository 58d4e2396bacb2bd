use tracing_subscriber::EnvFilter;

/// Crates whose events follow `--log-level`; everything else stays at `warn`.
const ACCTMERGE_TARGETS: [&str; 3] = ["acctmerge", "acctmerge_client", "acctmerge_engine"];

/// Filter directives for `level`, keeping HTTP stack chatter at `warn`.
fn default_directives(level: &str) -> String {
    std::iter::once("warn".to_string())
        .chain(ACCTMERGE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize structured logging on stderr; stdout carries command output.
///
/// `RUST_LOG` replaces the `--log-level` directives entirely when set.
pub fn init(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
