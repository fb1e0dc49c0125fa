//! Subscriber setup for the binary

use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing to stderr
///
/// Verbosity comes from `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// If a global subscriber is already installed
pub fn init(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
