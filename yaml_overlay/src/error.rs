//! Error types produced while applying overlays.

use thiserror::Error;

use crate::document::{KeyPath, ValueKind};

/// Failures raised while applying a single overlay fragment.
///
/// Every variant records the [`KeyPath`] of the overlay entry that could not
/// be applied so diagnostics can point at the offending key.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ApplyError {
    /// The overlay nests a mapping deeper than the applier descends.
    #[error("mapping at '{path}' exceeds the maximum overlay depth of {max_depth}")]
    DepthExceeded {
        /// Path of the mapping that crossed the limit.
        path: KeyPath,
        /// Depth limit in force.
        max_depth: usize,
    },

    /// The overlay targets a key the base document does not contain.
    #[error("key '{path}' does not exist in the base document")]
    MissingTarget {
        /// Path of the absent key.
        path: KeyPath,
    },

    /// The existing value cannot be combined with the overlay value.
    #[error("cannot append {addend} onto {existing} at '{path}'")]
    TypeMismatch {
        /// Path of the value being appended to.
        path: KeyPath,
        /// Kind of the value already in the base document.
        existing: ValueKind,
        /// Kind of the value supplied by the overlay.
        addend: ValueKind,
    },

    /// The overlay descends into a base value that is not a mapping.
    #[error("cannot descend into '{path}': base value is {found}, not a mapping")]
    NotAMapping {
        /// Path of the non-mapping base value.
        path: KeyPath,
        /// Kind of the value found there.
        found: ValueKind,
    },

    /// Numeric accumulation left the representable range.
    #[error("numeric overflow while appending at '{path}'")]
    NumericOverflow {
        /// Path of the value being appended to.
        path: KeyPath,
    },
}

impl ApplyError {
    /// Path of the overlay entry that triggered the failure.
    #[must_use]
    pub const fn path(&self) -> &KeyPath {
        match self {
            Self::DepthExceeded { path, .. }
            | Self::MissingTarget { path }
            | Self::TypeMismatch { path, .. }
            | Self::NotAMapping { path, .. }
            | Self::NumericOverflow { path } => path,
        }
    }
}

/// Failures attributed to a named overlay.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum OverlayError {
    /// A fragment of the overlay could not be applied.
    #[error("overlay '{overlay}': {source}")]
    Apply {
        /// Name of the overlay being applied.
        overlay: String,
        /// Underlying failure.
        #[source]
        source: ApplyError,
    },

    /// A `set` or `append` section is not a mapping.
    #[error("overlay '{overlay}': section '{section}' must be a mapping, found {found}")]
    InvalidSection {
        /// Name of the malformed overlay.
        overlay: String,
        /// Section key (`set` or `append`).
        section: String,
        /// Kind of the value found under the section key.
        found: ValueKind,
    },
}

impl OverlayError {
    /// Name of the overlay that failed.
    #[must_use]
    pub fn overlay(&self) -> &str {
        match self {
            Self::Apply { overlay, .. } | Self::InvalidSection { overlay, .. } => overlay,
        }
    }
}
