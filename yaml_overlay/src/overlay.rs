//! Named overlays split into their `append` and `set` fragments.

use tracing::warn;

use crate::apply::ApplyMode;
use crate::document::{Document, Value, ValueKind};
use crate::error::OverlayError;

/// A named set of changes to layer onto a base document.
///
/// Overlay documents have up to two top-level keys, `append` and `set`, each
/// holding a fragment whose key paths mirror the base document. The `append`
/// fragment is always applied before the `set` fragment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    name: String,
    append: Option<Document>,
    set: Option<Document>,
}

impl Overlay {
    /// Create an overlay with no changes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            append: None,
            set: None,
        }
    }

    /// Attach the fragment replaced by this overlay.
    #[must_use]
    pub fn with_set(mut self, fragment: Document) -> Self {
        self.set = Some(fragment);
        self
    }

    /// Attach the fragment accumulated by this overlay.
    #[must_use]
    pub fn with_append(mut self, fragment: Document) -> Self {
        self.append = Some(fragment);
        self
    }

    /// Split a parsed overlay document into its sections.
    ///
    /// Top-level keys other than `append` and `set` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidSection`] when a section is present but
    /// is not a mapping.
    pub fn from_document(
        name: impl Into<String>,
        document: Document,
    ) -> Result<Self, OverlayError> {
        let mut overlay = Self::new(name);
        for (key, value) in document {
            let mode = match key.as_str() {
                "append" => ApplyMode::Append,
                "set" => ApplyMode::Set,
                _ => {
                    warn!(overlay = %overlay.name, %key, "ignoring unknown top-level overlay key");
                    continue;
                }
            };
            let fragment = section(&overlay.name, mode, value)?;
            match mode {
                ApplyMode::Append => overlay.append = Some(fragment),
                ApplyMode::Set => overlay.set = Some(fragment),
            }
        }
        Ok(overlay)
    }

    /// The overlay name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `set` fragment, if any.
    #[must_use]
    pub const fn set(&self) -> Option<&Document> {
        self.set.as_ref()
    }

    /// The `append` fragment, if any.
    #[must_use]
    pub const fn append(&self) -> Option<&Document> {
        self.append.as_ref()
    }

    /// Present sections in application order: `append`, then `set`.
    pub fn sections(&self) -> impl Iterator<Item = (ApplyMode, &Document)> {
        [
            (ApplyMode::Append, self.append.as_ref()),
            (ApplyMode::Set, self.set.as_ref()),
        ]
        .into_iter()
        .filter_map(|(mode, fragment)| fragment.map(|fragment| (mode, fragment)))
    }
}

fn section(overlay: &str, mode: ApplyMode, value: Value) -> Result<Document, OverlayError> {
    match value {
        Value::Object(fragment) => Ok(fragment),
        other => Err(OverlayError::InvalidSection {
            overlay: overlay.to_owned(),
            section: mode.as_str().to_owned(),
            found: ValueKind::of(&other),
        }),
    }
}
