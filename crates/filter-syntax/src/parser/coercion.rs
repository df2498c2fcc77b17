//! Turns the raw `value` of a condition into a typed [`ConditionValue`],
//! following the operator's arity and the field's value type.

use crate::errors::ValidationCode;
use model::{Arity, CoercionPolicy, ConditionValue, FieldSpec, OperatorKind, Scalar, ValueType};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

pub(crate) type CoercionResult<T> = Result<T, (ValidationCode, String)>;

pub(crate) fn coerce_value(
    field: &FieldSpec,
    operator: OperatorKind,
    raw: &JsonValue,
) -> CoercionResult<ConditionValue> {
    match operator.arity() {
        Arity::Single => {
            if raw.is_array() {
                return Err(arity_error(operator, raw));
            }
            coerce_scalar(field, raw).map(ConditionValue::Scalar)
        }
        Arity::List => match raw {
            JsonValue::Array(items) if !items.is_empty() => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    coerce_scalar(field, item).map_err(|(code, msg)| (code, format!("item {i}: {msg}")))
                })
                .collect::<CoercionResult<Vec<_>>>()
                .map(ConditionValue::List),
            _ => Err(arity_error(operator, raw)),
        },
        Arity::Pair => match raw {
            JsonValue::Array(items) if items.len() == 2 => {
                let low = coerce_scalar(field, &items[0])
                    .map_err(|(code, msg)| (code, format!("lower bound: {msg}")))?;
                let high = coerce_scalar(field, &items[1])
                    .map_err(|(code, msg)| (code, format!("upper bound: {msg}")))?;
                if low.compare(&high) == Some(Ordering::Greater) {
                    return Err((
                        ValidationCode::RangeInverted,
                        format!("lower bound {low} is greater than upper bound {high}"),
                    ));
                }
                Ok(ConditionValue::Pair(low, high))
            }
            _ => Err(arity_error(operator, raw)),
        },
        Arity::Flag => match raw {
            JsonValue::Bool(flag) => Ok(ConditionValue::Scalar(Scalar::Boolean(*flag))),
            JsonValue::Array(_) => Err(arity_error(operator, raw)),
            other => Err(type_error("a boolean", other)),
        },
    }
}

fn coerce_scalar(field: &FieldSpec, raw: &JsonValue) -> CoercionResult<Scalar> {
    match field.value_type() {
        ValueType::String => match raw {
            JsonValue::String(s) => Ok(Scalar::String(s.clone())),
            other => Err(type_error("a string", other)),
        },
        ValueType::Number => coerce_number(raw, field.coercion()),
        ValueType::Boolean => match raw {
            JsonValue::Bool(b) => Ok(Scalar::Boolean(*b)),
            other => Err(type_error("a boolean", other)),
        },
        ValueType::Date => match raw {
            JsonValue::String(s) => Scalar::parse_temporal(s).ok_or_else(|| {
                (
                    ValidationCode::TypeMismatch,
                    format!("'{s}' is not a YYYY-MM-DD date or RFC 3339 timestamp"),
                )
            }),
            other => Err(type_error("a date string", other)),
        },
        ValueType::Enum => match raw {
            JsonValue::String(s) if field.is_enum_value(s) => Ok(Scalar::String(s.clone())),
            JsonValue::String(s) => Err((
                ValidationCode::TypeMismatch,
                format!(
                    "'{s}' is not one of: {}",
                    field.enum_values().collect::<Vec<_>>().join(", ")
                ),
            )),
            other => Err(type_error("one of the declared choices", other)),
        },
        ValueType::Reference => match raw {
            JsonValue::Number(n) => n.as_i64().map(Scalar::Int).ok_or_else(|| {
                (
                    ValidationCode::TypeMismatch,
                    format!("reference {n} is not an integer in range"),
                )
            }),
            JsonValue::String(s) if !s.is_empty() => Ok(Scalar::String(s.clone())),
            JsonValue::String(_) => Err((
                ValidationCode::TypeMismatch,
                "reference must not be empty".to_string(),
            )),
            other => Err(type_error("an integer or string reference", other)),
        },
    }
}

fn coerce_number(raw: &JsonValue, policy: CoercionPolicy) -> CoercionResult<Scalar> {
    match (raw, policy) {
        (JsonValue::Number(n), _) => number_scalar(n).ok_or_else(|| {
            (
                ValidationCode::TypeMismatch,
                format!("{n} is not a representable number"),
            )
        }),
        (JsonValue::String(s), CoercionPolicy::NumericStrings) => {
            let trimmed = s.trim();
            if let Ok(v) = trimmed.parse::<i64>() {
                return Ok(Scalar::Int(v));
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Scalar::Float(v)),
                _ => Err((
                    ValidationCode::TypeMismatch,
                    format!("'{s}' is not a number"),
                )),
            }
        }
        (other, _) => Err(type_error("a number", other)),
    }
}

fn number_scalar(n: &serde_json::Number) -> Option<Scalar> {
    if let Some(v) = n.as_i64() {
        Some(Scalar::Int(v))
    } else {
        n.as_f64().filter(|v| v.is_finite()).map(Scalar::Float)
    }
}

fn arity_error(operator: OperatorKind, raw: &JsonValue) -> (ValidationCode, String) {
    (
        ValidationCode::ArityMismatch,
        format!(
            "operator '{}' expects {}, got {}",
            operator.wire_name(),
            operator.arity(),
            describe_json(raw)
        ),
    )
}

fn type_error(expected: &str, raw: &JsonValue) -> (ValidationCode, String) {
    (
        ValidationCode::TypeMismatch,
        format!("expected {expected}, got {}", describe_json(raw)),
    )
}

pub(crate) fn describe_json(raw: &JsonValue) -> String {
    match raw {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(_) => "a boolean".to_string(),
        JsonValue::Number(_) => "a number".to_string(),
        JsonValue::String(_) => "a string".to_string(),
        JsonValue::Array(items) => format!("an array of {} items", items.len()),
        JsonValue::Object(_) => "an object".to_string(),
    }
}
