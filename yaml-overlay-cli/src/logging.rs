//! Diagnostic logging for the binary.
//!
//! Events go to standard error so standard output carries only the merged
//! document.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "YAML_OVERLAY_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber is already set.
pub fn init() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
