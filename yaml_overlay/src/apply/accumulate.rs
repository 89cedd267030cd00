//! Additive combination of leaf values for [`super::ApplyMode::Append`].

use serde_json::Number;

use crate::document::{KeyPath, Value, ValueKind};
use crate::error::ApplyError;

/// Add `addend` onto `existing` in place.
///
/// Integers add exactly, mixing in a float yields a float, strings and
/// sequences concatenate. Booleans are not numbers.
pub(super) fn accumulate(
    existing: &mut Value,
    addend: &Value,
    path: KeyPath,
) -> Result<(), ApplyError> {
    match (existing, addend) {
        (Value::Number(lhs), Value::Number(rhs)) => {
            *lhs = add_numbers(lhs, rhs).ok_or(ApplyError::NumericOverflow { path })?;
        }
        (Value::String(lhs), Value::String(rhs)) => lhs.push_str(rhs),
        (Value::Array(lhs), Value::Array(rhs)) => lhs.extend(rhs.iter().cloned()),
        (lhs, rhs) => {
            return Err(ApplyError::TypeMismatch {
                path,
                existing: ValueKind::of(lhs),
                addend: ValueKind::of(rhs),
            });
        }
    }
    Ok(())
}

fn add_numbers(lhs: &Number, rhs: &Number) -> Option<Number> {
    if let (Some(a), Some(b)) = (as_integer(lhs), as_integer(rhs)) {
        return integer_number(a.checked_add(b)?);
    }
    Number::from_f64(float_sum(lhs.as_f64()?, rhs.as_f64()?))
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn integer_number(value: i128) -> Option<Number> {
    i64::try_from(value)
        .map(Number::from)
        .or_else(|_| u64::try_from(value).map(Number::from))
        .ok()
}

#[expect(
    clippy::float_arithmetic,
    reason = "appending onto a float leaf is float addition"
)]
fn float_sum(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}
