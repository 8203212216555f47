//! Logging configuration using tracing
//!
//! Diagnostics go to stderr, filtered via the RUST_LOG environment
//! variable. Stdout is reserved for `dump` output and the subprocess
//! audit trail, so the two streams never mix.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Filtering defaults to "warn" for quiet CLI output; raise it with e.g.
/// `RUST_LOG=debug` or `RUST_LOG=externals=trace,gitcli=info`.
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init() -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| crate::ExternalsError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}
