//! Overlay directory resolution.
//!
//! The overlay directory may come from `--overlay-dir` or from the
//! `OVERLAY_DIR` environment variable. Both sources are layered with Figment:
//! the environment first, the command line merged over it, so an explicit
//! flag always wins. The environment provider is passed in rather than read
//! implicitly, which keeps the precedence rule testable.
//!
//! `OVERLAY_DIR` is taken verbatim. Figment's `Env` provider would parse a
//! value such as `2024` or `true` into a number or boolean, which a path
//! field then rejects.

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment, Provider,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Environment variable naming the overlay directory.
pub const OVERLAY_DIR_ENV: &str = "OVERLAY_DIR";

/// Extension appended to overlay names to form file names.
pub const OVERLAY_EXTENSION: &str = "yaml";

/// Resolved settings for locating overlay files.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OverlaySettings {
    /// Directory overlays are read from. Relative to the working directory
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_dir: Option<Utf8PathBuf>,
}

impl OverlaySettings {
    /// Layer `cli` over the values supplied by `environment`.
    ///
    /// Fields left as `None` in `cli` fall back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Settings`] when the merged values cannot be
    /// extracted.
    pub fn resolve<P: Provider>(cli: &Self, environment: P) -> Result<Self, CliError> {
        Figment::from(environment)
            .merge(Serialized::defaults(cli))
            .extract()
            .map_err(|err| CliError::Settings(Box::new(err)))
    }

    /// Layer `cli` over the process environment.
    ///
    /// # Errors
    ///
    /// See [`OverlaySettings::resolve`].
    pub fn resolve_from_env(cli: &Self) -> Result<Self, CliError> {
        Self::resolve(cli, environment_provider())
    }

    /// Path of the overlay called `name`.
    ///
    /// The file name is `<name>.yaml`, joined onto the overlay directory when
    /// one is configured. Absolute names ignore the directory.
    #[must_use]
    pub fn overlay_path(&self, name: &str) -> Utf8PathBuf {
        let file_name = format!("{name}.{OVERLAY_EXTENSION}");
        self.overlay_dir.as_deref().map_or_else(
            || Utf8PathBuf::from(&file_name),
            |dir: &Utf8Path| dir.join(&file_name),
        )
    }
}

/// Figment provider reading [`OVERLAY_DIR_ENV`] into `overlay_dir` as an
/// uninterpreted string.
#[must_use]
pub fn environment_provider() -> Serialized<OverlaySettings> {
    Serialized::defaults(OverlaySettings {
        overlay_dir: Env::var(OVERLAY_DIR_ENV).map(Utf8PathBuf::from),
    })
}
