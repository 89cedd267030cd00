//! Overlay application.
//!
//! Fragments are walked recursively. Leaves either replace the base value
//! ([`ApplyMode::Set`]) or are accumulated onto it ([`ApplyMode::Append`]);
//! nested mappings descend into the matching base mapping. The walk is
//! bounded: a fragment nesting a mapping at [`OverlayApplier::max_depth`] is
//! rejected with [`ApplyError::DepthExceeded`] before the base is consulted.
//!
//! Work is staged on a copy of the base document and committed only once the
//! whole fragment (or overlay) has been applied, so a failed call leaves the
//! caller's document untouched.

mod accumulate;

use std::fmt;

use tracing::debug;

use crate::document::{Document, KeyPath, Value, ValueKind};
use crate::error::{ApplyError, OverlayError};
use crate::overlay::Overlay;

use accumulate::accumulate;

/// Number of mapping levels an overlay fragment may address.
pub const MAX_DEPTH: usize = 4;

/// How leaves of an overlay fragment combine with the base document.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ApplyMode {
    /// Replace the base value.
    Set,
    /// Add the overlay value onto the existing base value.
    Append,
}

impl ApplyMode {
    /// The overlay section key selecting this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies overlay fragments to base documents.
///
/// The applier is stateless apart from its depth limit and may be shared
/// freely; each call operates only on the document it is given.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OverlayApplier {
    max_depth: usize,
}

impl Default for OverlayApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayApplier {
    /// Create an applier limited to [`MAX_DEPTH`] mapping levels.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_depth(MAX_DEPTH)
    }

    /// Create an applier limited to `max_depth` mapping levels.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn max_depth(self) -> usize {
        self.max_depth
    }

    /// Apply `fragment` to `base` using `mode`, returning `base` for chaining.
    ///
    /// # Errors
    ///
    /// Returns an [`ApplyError`] when the fragment nests too deeply, targets a
    /// key missing from `base`, or appends a value the existing one cannot
    /// absorb. `base` is left unchanged on error.
    pub fn apply<'a>(
        self,
        base: &'a mut Document,
        fragment: &Document,
        mode: ApplyMode,
    ) -> Result<&'a mut Document, ApplyError> {
        let mut staged = base.clone();
        self.apply_fragment(&mut staged, fragment, mode)?;
        *base = staged;
        Ok(base)
    }

    /// Apply the `append` section of `overlay` and then its `set` section.
    ///
    /// # Errors
    ///
    /// Returns an [`OverlayError::Apply`] naming the overlay when either
    /// section fails. `base` is left unchanged on error, including any
    /// appends that preceded a failing `set`.
    pub fn apply_overlay<'a>(
        self,
        base: &'a mut Document,
        overlay: &Overlay,
    ) -> Result<&'a mut Document, OverlayError> {
        let mut staged = base.clone();
        for (mode, fragment) in overlay.sections() {
            debug!(
                overlay = overlay.name(),
                %mode,
                keys = fragment.len(),
                "applying overlay section"
            );
            self.apply_fragment(&mut staged, fragment, mode)
                .map_err(|source| OverlayError::Apply {
                    overlay: overlay.name().to_owned(),
                    source,
                })?;
        }
        *base = staged;
        Ok(base)
    }

    /// Apply `overlays` in order, layering each on the result of the last.
    ///
    /// # Errors
    ///
    /// Stops at the first overlay that fails and returns its error. Overlays
    /// applied before the failure remain applied; the failing one does not.
    pub fn apply_overlays<'a, 'o, I>(
        self,
        base: &'a mut Document,
        overlays: I,
    ) -> Result<&'a mut Document, OverlayError>
    where
        I: IntoIterator<Item = &'o Overlay>,
    {
        for overlay in overlays {
            self.apply_overlay(base, overlay)?;
        }
        Ok(base)
    }

    fn apply_fragment(
        self,
        target: &mut Document,
        fragment: &Document,
        mode: ApplyMode,
    ) -> Result<(), ApplyError> {
        self.check_depth(fragment, &KeyPath::root())?;
        self.walk(target, fragment, mode, &KeyPath::root())
    }

    /// Reject fragments nesting a mapping at or beyond the depth limit before
    /// any base value is inspected.
    fn check_depth(self, fragment: &Document, parent: &KeyPath) -> Result<(), ApplyError> {
        for (key, value) in fragment {
            if let Value::Object(nested) = value {
                let path = parent.child(key);
                if path.depth() >= self.max_depth {
                    return Err(ApplyError::DepthExceeded {
                        path,
                        max_depth: self.max_depth,
                    });
                }
                self.check_depth(nested, &path)?;
            }
        }
        Ok(())
    }

    fn walk(
        self,
        target: &mut Document,
        fragment: &Document,
        mode: ApplyMode,
        parent: &KeyPath,
    ) -> Result<(), ApplyError> {
        for (key, value) in fragment {
            let path = parent.child(key);
            match value {
                Value::Object(nested) => self.descend(target, key, nested, mode, path)?,
                leaf => apply_leaf(target, key, leaf, mode, path)?,
            }
        }
        Ok(())
    }

    fn descend(
        self,
        target: &mut Document,
        key: &str,
        nested: &Document,
        mode: ApplyMode,
        path: KeyPath,
    ) -> Result<(), ApplyError> {
        // An empty mapping addresses nothing, so the base is never inspected.
        if nested.is_empty() {
            return Ok(());
        }
        match target.get_mut(key) {
            Some(Value::Object(child)) => self.walk(child, nested, mode, &path),
            Some(other) => Err(ApplyError::NotAMapping {
                found: ValueKind::of(other),
                path,
            }),
            None => Err(ApplyError::MissingTarget { path }),
        }
    }
}

fn apply_leaf(
    target: &mut Document,
    key: &str,
    leaf: &Value,
    mode: ApplyMode,
    path: KeyPath,
) -> Result<(), ApplyError> {
    match mode {
        ApplyMode::Set => {
            target.insert(key.to_owned(), leaf.clone());
            Ok(())
        }
        ApplyMode::Append => match target.get_mut(key) {
            Some(existing) => accumulate(existing, leaf, path),
            None => Err(ApplyError::MissingTarget { path }),
        },
    }
}

/// Apply `fragment` to `base` with the default depth limit.
///
/// # Errors
///
/// See [`OverlayApplier::apply`].
pub fn apply<'a>(
    base: &'a mut Document,
    fragment: &Document,
    mode: ApplyMode,
) -> Result<&'a mut Document, ApplyError> {
    OverlayApplier::new().apply(base, fragment, mode)
}

/// Apply a single overlay with the default depth limit.
///
/// # Errors
///
/// See [`OverlayApplier::apply_overlay`].
pub fn apply_overlay<'a>(
    base: &'a mut Document,
    overlay: &Overlay,
) -> Result<&'a mut Document, OverlayError> {
    OverlayApplier::new().apply_overlay(base, overlay)
}

/// Apply overlays in order with the default depth limit.
///
/// # Errors
///
/// See [`OverlayApplier::apply_overlays`].
pub fn apply_overlays<'a, 'o, I>(
    base: &'a mut Document,
    overlays: I,
) -> Result<&'a mut Document, OverlayError>
where
    I: IntoIterator<Item = &'o Overlay>,
{
    OverlayApplier::new().apply_overlays(base, overlays)
}

#[cfg(test)]
mod tests;
