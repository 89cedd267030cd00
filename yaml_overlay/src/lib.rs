//! Core crate for generating YAML configuration variants from overlays.
//!
//! A base [`Document`] is combined with a sequence of named [`Overlay`]s.
//! Each overlay carries an optional `append` fragment, whose leaves are
//! accumulated onto existing values, and an optional `set` fragment, whose
//! leaves replace them. Reading files and parsing arguments is left to the
//! `yaml-overlay-cli` crate; this crate works purely on in-memory values.
//!
//! ```rust
//! use yaml_overlay::{Overlay, apply_overlays, yaml};
//!
//! let mut base = yaml::parse_document("base.yaml", "a:\n  b: 1\n  c: x\n")?;
//! let overlay = Overlay::from_document(
//!     "prod",
//!     yaml::parse_document("prod.yaml", "append:\n  a:\n    b: 5\nset:\n  a:\n    c: y\n")?,
//! )?;
//! apply_overlays(&mut base, [&overlay])?;
//! assert_eq!(yaml::to_yaml_string(&base)?, "a:\n  b: 6\n  c: y\n");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod apply;
mod document;
mod error;
mod overlay;
pub mod yaml;

pub use apply::{ApplyMode, MAX_DEPTH, OverlayApplier, apply, apply_overlay, apply_overlays};
pub use document::{Document, KeyPath, Value, ValueKind};
pub use error::{ApplyError, OverlayError};
pub use overlay::Overlay;
pub use yaml::YamlError;
