//! Reading base and overlay documents.

use std::io::{ErrorKind, Read};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use yaml_overlay::{Document, Overlay, yaml};

use crate::error::CliError;
use crate::settings::OverlaySettings;

/// Path argument selecting standard input.
pub const STDIN_SENTINEL: &str = "-";

/// Where the base document is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BaseSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(Utf8PathBuf),
}

impl BaseSource {
    /// Interpret a base path argument, treating `-` as standard input.
    #[must_use]
    pub fn from_arg(arg: &Utf8Path) -> Self {
        if arg.as_str() == STDIN_SENTINEL {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    /// Label used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Stdin => "<stdin>",
            Self::File(path) => path.as_str(),
        }
    }
}

/// Load the base document from `source`, reading `stdin` when requested.
///
/// # Errors
///
/// Returns [`CliError::NotFound`] or [`CliError::Io`] when the input cannot be
/// read and [`CliError::Yaml`] when it is not a YAML mapping.
pub fn load_base<R: Read + ?Sized>(
    source: &BaseSource,
    stdin: &mut R,
) -> Result<Document, CliError> {
    let contents = match source {
        BaseSource::Stdin => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .map_err(|err| CliError::Io {
                    path: Utf8PathBuf::from(source.label()),
                    source: err,
                })?;
            buffer
        }
        BaseSource::File(path) => read_file(path)?,
    };
    debug!(base = source.label(), bytes = contents.len(), "loaded base document");
    Ok(yaml::parse_document(source.label(), &contents)?)
}

/// Load the overlay called `name` using `settings` to locate it.
///
/// # Errors
///
/// Returns [`CliError::NotFound`] when the overlay file does not exist,
/// [`CliError::Yaml`] when it is malformed and [`CliError::Overlay`] when its
/// sections are not mappings.
pub fn load_overlay(settings: &OverlaySettings, name: &str) -> Result<Overlay, CliError> {
    let path = settings.overlay_path(name);
    let contents = read_file(&path)?;
    debug!(overlay = name, %path, "loaded overlay");
    let document = yaml::parse_document(path.as_str(), &contents)?;
    Ok(Overlay::from_document(name, document)?)
}

/// Load every overlay in `names`, in order, before any is applied.
///
/// # Errors
///
/// Returns the first failure reported by [`load_overlay`].
pub fn load_overlays<S: AsRef<str>>(
    settings: &OverlaySettings,
    names: &[S],
) -> Result<Vec<Overlay>, CliError> {
    names
        .iter()
        .map(|name| load_overlay(settings, name.as_ref()))
        .collect()
}

fn read_file(path: &Utf8Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CliError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CliError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
