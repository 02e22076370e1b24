use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` derived filter.
pub const LOG_ENV: &str = "KINFOLK_LOG";

fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON output.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
