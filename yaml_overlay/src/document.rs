//! Document model shared by the applier and the YAML codec.

use std::fmt;

pub use serde_json::Value;

/// An order-preserving mapping with string keys.
///
/// Backed by [`serde_json::Map`] with the `preserve_order` feature so keys are
/// emitted in the order they were read (or inserted).
pub type Document = serde_json::Map<String, Value>;

/// Dotted key path used to locate a value inside a [`Document`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path, addressing the document itself.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_owned());
        Self { segments }
    }

    /// Number of keys in the path. Top-level keys have depth 1.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The individual keys making up the path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.segments.join("."))
    }
}

/// Coarse classification of a [`Value`], used in diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    /// `null` or an empty YAML value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number without a fractional part.
    Integer,
    /// A floating-point number.
    Float,
    /// A string scalar.
    String,
    /// A YAML sequence.
    Sequence,
    /// A YAML mapping.
    Mapping,
}

impl ValueKind {
    /// Classify `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "a boolean",
            Self::Integer => "an integer",
            Self::Float => "a float",
            Self::String => "a string",
            Self::Sequence => "a sequence",
            Self::Mapping => "a mapping",
        })
    }
}
