//! Command-line interface definitions for `yaml-overlay`.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::settings::OverlaySettings;

/// Parsed CLI arguments for `yaml-overlay`.
#[derive(Debug, Parser)]
#[command(name = "yaml-overlay")]
#[command(
    about = "Create a variant of a YAML document by applying overlays which describe changes"
)]
#[command(version)]
pub struct Args {
    /// YAML document to use as the base. Pass `-` to read standard input.
    #[arg(value_name = "BASE")]
    pub base: Utf8PathBuf,
    /// Overlays to apply in sequential order, named without the `.yaml`
    /// extension.
    #[arg(value_name = "OVERLAY", required = true)]
    pub overlays: Vec<String>,
    /// Directory containing the overlays. Overrides the `OVERLAY_DIR`
    /// environment variable.
    #[arg(long, value_name = "DIR", alias = "overlay_dir")]
    pub overlay_dir: Option<Utf8PathBuf>,
}

impl Args {
    /// Settings supplied on the command line, before environment fallback.
    #[must_use]
    pub fn settings(&self) -> OverlaySettings {
        OverlaySettings {
            overlay_dir: self.overlay_dir.clone(),
        }
    }
}
