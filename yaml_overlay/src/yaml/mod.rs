//! YAML reading and writing for [`Document`]s.
//!
//! Parsing goes through `serde-saphyr` with strict YAML 1.2 booleans, so only
//! `true` and `false` become booleans and values such as `yes` stay strings.
//! Emission uses `serde_yaml`, which writes block-style YAML in key order.
//!
//! Scalars a [`Document`] cannot hold exactly are parse errors: `.inf`, `.nan`
//! and their variants (quoted or not), and integers outside the `i64`/`u64`
//! range. Duplicate keys are rejected as well.

mod strict;

use serde_saphyr::Options;
use thiserror::Error;

use crate::document::{Document, Value, ValueKind};
use strict::StrictValue;

/// Errors raised while converting between YAML text and documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum YamlError {
    /// The input is not valid YAML.
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        /// Name of the input, typically its path.
        source_name: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The input parsed, but its top level is not a mapping.
    #[error("{source_name} must contain a mapping at the top level, found {found}")]
    NotAMapping {
        /// Name of the input, typically its path.
        source_name: String,
        /// Kind of the top-level value.
        found: ValueKind,
    },

    /// The document could not be serialised.
    #[error("failed to emit YAML: {0}")]
    Emit(#[from] serde_yaml::Error),
}

/// Parse `contents` into a [`Document`].
///
/// `source_name` only labels diagnostics.
///
/// # Errors
///
/// Returns [`YamlError::Parse`] for malformed YAML (including duplicate keys
/// and unrepresentable scalars) and [`YamlError::NotAMapping`] when the
/// top-level value is not a mapping.
pub fn parse_document(source_name: &str, contents: &str) -> Result<Document, YamlError> {
    let StrictValue(value) = serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| YamlError::Parse {
        source_name: source_name.to_owned(),
        message: err.to_string(),
    })?;
    match value {
        Value::Object(document) => Ok(document),
        other => Err(YamlError::NotAMapping {
            source_name: source_name.to_owned(),
            found: ValueKind::of(&other),
        }),
    }
}

/// Render `document` as block-style YAML.
///
/// # Errors
///
/// Returns [`YamlError::Emit`] if serialisation fails.
pub fn to_yaml_string(document: &Document) -> Result<String, YamlError> {
    Ok(serde_yaml::to_string(document)?)
}
