//! Command-line front end for `yaml_overlay`.
//!
//! The binary reads a base YAML document from a file (or standard input when
//! the path is `-`), resolves each overlay name to `<name>.yaml` inside the
//! overlay directory, applies the overlays in order and prints the merged
//! document as block-style YAML.
//!
//! Everything the binary does is reachable through [`run`], which takes its
//! input and output streams explicitly so it can be exercised in tests.

pub mod cli;
pub mod error;
pub mod loader;
pub mod logging;
pub mod output;
pub mod settings;

use std::io::{Read, Write};

use tracing::info;

use crate::cli::Args;
use crate::error::CliError;
use crate::loader::BaseSource;
use crate::settings::OverlaySettings;

/// Load the base document and overlays, apply them and write the result.
///
/// All overlays are loaded before any is applied, and the output is rendered
/// in full before anything is written, so a failure never produces partial
/// output.
///
/// # Errors
///
/// Returns a [`CliError`] when a file cannot be read or parsed, an overlay
/// cannot be applied, or the output cannot be written.
pub fn run<R, W>(
    args: &Args,
    settings: &OverlaySettings,
    stdin: &mut R,
    stdout: &mut W,
) -> Result<(), CliError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    info!(overlay_dir = ?settings.overlay_dir, "resolved overlay directory");
    let source = BaseSource::from_arg(&args.base);
    let mut document = loader::load_base(&source, stdin)?;
    let overlays = loader::load_overlays(settings, &args.overlays)?;
    yaml_overlay::apply_overlays(&mut document, &overlays)?;
    output::write_document(stdout, &document)
}
