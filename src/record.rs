/**
 * Typed extraction of fields from untyped JSON records.
 *
 * Every accessor returns either the typed value or a `FieldError` saying precisely what was
 * wrong, so callers can turn it into a diagnostic.
 */
use serde::Deserialize;
use serde_json::Value;

use crate::amount::Amount;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("expected an object, found {found}")]
    NotAnObject { found: String },
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("field `{field}` {reason}, found {found}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
        found: String,
    },
}

impl FieldError {
    fn wrong_type(field: &'static str, expected: &'static str, value: &Value) -> Self {
        FieldError::WrongType {
            field,
            expected,
            found: value.to_string(),
        }
    }

    fn out_of_range(field: &'static str, reason: &'static str, value: &Value) -> Self {
        FieldError::OutOfRange {
            field,
            reason,
            found: value.to_string(),
        }
    }
}

fn field<'a>(record: &'a Value, name: &'static str) -> Result<&'a Value, FieldError> {
    let object = record.as_object().ok_or_else(|| FieldError::NotAnObject {
        found: record.to_string(),
    })?;
    object.get(name).ok_or(FieldError::Missing(name))
}

/// A non-empty string field.
pub fn text<'a>(record: &'a Value, name: &'static str) -> Result<&'a str, FieldError> {
    let value = field(record, name)?;
    match value.as_str() {
        Some("") => Err(FieldError::out_of_range(name, "must not be empty", value)),
        Some(s) => Ok(s),
        None => Err(FieldError::wrong_type(name, "a string", value)),
    }
}

/// A non-negative decimal given as a JSON number or a numeric string.
pub fn price(record: &Value, name: &'static str) -> Result<Amount, FieldError> {
    let value = field(record, name)?;
    let amount = match value {
        Value::Number(_) | Value::String(_) => Amount::deserialize(value)
            .map_err(|_| FieldError::wrong_type(name, "a decimal number", value))?,
        _ => return Err(FieldError::wrong_type(name, "a decimal number", value)),
    };
    if amount.is_negative() {
        return Err(FieldError::out_of_range(name, "must not be negative", value));
    }
    Ok(amount)
}

/// A strictly positive integer given as a JSON number or an integer string.
/// Fractional numbers are truncated toward zero before the range check.
pub fn quantity(record: &Value, name: &'static str) -> Result<u64, FieldError> {
    let value = field(record, name)?;
    let quantity = match value {
        Value::Number(n) if n.is_i64() => n.as_i64(),
        Value::Number(n) if n.is_u64() => None,
        Value::Number(n) => n
            .as_f64()
            .map(f64::trunc)
            .filter(|q| *q < i64::MAX as f64)
            .map(|q| q as i64),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(q) => Some(q),
            Err(_) => return Err(FieldError::wrong_type(name, "an integer", value)),
        },
        _ => return Err(FieldError::wrong_type(name, "an integer", value)),
    };
    match quantity {
        Some(q) if q > 0 => Ok(q as u64),
        Some(_) => Err(FieldError::out_of_range(
            name,
            "must be greater than zero",
            value,
        )),
        None => Err(FieldError::out_of_range(name, "is too large", value)),
    }
}
