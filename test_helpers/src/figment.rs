//! `figment::Jail` plumbing for settings tests.
//!
//! Overlay directory resolution reads `OVERLAY_DIR` from the process
//! environment, so settings tests run inside a jail that serialises access to
//! the environment and restores it afterwards.

use anyhow::{Result, anyhow};
use figment::Jail;

/// Runs `resolve` inside a [`Jail`] and hands back the settings it produced.
///
/// # Errors
///
/// Returns an error when the jail cannot be set up or `resolve` fails.
pub fn with_jail<F, T>(resolve: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    let mut resolved = None;
    Jail::try_with(|jail| {
        resolved = Some(resolve(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("settings jail failed: {err}"))?;
    resolved.ok_or_else(|| anyhow!("settings jail produced no value"))
}

/// Adapts a settings error for return from a [`Jail`] closure.
#[expect(
    clippy::needless_pass_by_value,
    reason = "passed to `map_err`, which supplies the error by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
