//! Writing the merged document.

use std::io::Write;

use yaml_overlay::{Document, yaml};

use crate::error::CliError;

/// Render `document` as block-style YAML and write it to `writer`.
///
/// The document is rendered in full before the first byte is written.
///
/// # Errors
///
/// Returns [`CliError::Yaml`] when rendering fails and [`CliError::Output`]
/// when writing fails.
pub fn write_document<W: Write + ?Sized>(
    writer: &mut W,
    document: &Document,
) -> Result<(), CliError> {
    let rendered = yaml::to_yaml_string(document)?;
    writer
        .write_all(rendered.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(CliError::Output)
}
