//! Logging setup for json-toolkit.
//!
//! Library code logs through `tracing` macros. The binary installs a `fmt`
//! subscriber once at startup:
//!
//! ```no_run
//! json_toolkit::logging::init().expect("Failed to initialize logging");
//! tracing::info!("App started");
//! ```
//!
//! Logs go to stderr so they never mix with artifacts or prompts on stdout.
//! The default filter is `warn`; set `RUST_LOG=info` (or `debug`) for
//! per-operation detail.

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes the global subscriber.
///
/// # Errors
///
/// Returns error if the filter is invalid or a global subscriber has already
/// been installed.
pub fn init() -> Result<()> {
    // Default to WARN, allow override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logger")?;

    tracing::debug!("Logging initialized (default filter: {DEFAULT_FILTER})");
    Ok(())
}
