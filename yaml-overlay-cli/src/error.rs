//! Error types for the `yaml-overlay` pipeline.

use camino::Utf8PathBuf;
use thiserror::Error;
use yaml_overlay::{OverlayError, YamlError};

/// Errors surfaced while producing an overlaid document.
///
/// Every failure is fatal: the binary reports the error and exits without
/// writing a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The overlay directory settings could not be resolved.
    #[error("failed to resolve settings: {0}")]
    Settings(#[source] Box<figment::Error>),

    /// A base or overlay file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: Utf8PathBuf,
    },

    /// A base or overlay file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid YAML or is not a mapping.
    #[error(transparent)]
    Yaml(#[from] YamlError),

    /// An overlay is malformed or could not be applied.
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// The merged document could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
