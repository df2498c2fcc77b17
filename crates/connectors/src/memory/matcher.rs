//! In-memory evaluation of compiled filters against JSON records.
//!
//! A missing or `null` field satisfies nothing except `isnull: true`. NOT is
//! plain boolean negation, so `NOT (age > 3)` also matches records without an
//! age.

use compiler::{BooleanPredicate, PredicateBuilder};
use model::{ConditionValue, FieldSpec, OperatorKind, Scalar, ValueType};
use serde_json::{Map, Value as JsonValue};
use std::{cmp::Ordering, convert::Infallible};

pub type Record = Map<String, JsonValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordMatcher {
    Condition {
        field: String,
        value_type: ValueType,
        operator: OperatorKind,
        value: ConditionValue,
    },
    All(Vec<RecordMatcher>),
    Any(Vec<RecordMatcher>),
    Not(Box<RecordMatcher>),
}

impl RecordMatcher {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RecordMatcher::All(children) => children.iter().all(|c| c.matches(record)),
            RecordMatcher::Any(children) => children.iter().any(|c| c.matches(record)),
            RecordMatcher::Not(inner) => !inner.matches(record),
            RecordMatcher::Condition {
                field,
                value_type,
                operator,
                value,
            } => {
                let stored = record
                    .get(field)
                    .filter(|v| !v.is_null())
                    .and_then(|v| read_scalar(*value_type, v));
                evaluate(stored.as_ref(), *operator, value)
            }
        }
    }

    /// Records matching `self`, in input order.
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl BooleanPredicate for RecordMatcher {
    fn and(children: Vec<Self>) -> Self {
        RecordMatcher::All(children)
    }

    fn or(children: Vec<Self>) -> Self {
        RecordMatcher::Any(children)
    }

    fn not(inner: Self) -> Self {
        RecordMatcher::Not(Box::new(inner))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPredicateBuilder;

impl PredicateBuilder for MemoryPredicateBuilder {
    type Predicate = RecordMatcher;
    type Error = Infallible;

    fn build(
        &self,
        field: &FieldSpec,
        operator: OperatorKind,
        value: &ConditionValue,
    ) -> Result<RecordMatcher, Infallible> {
        Ok(RecordMatcher::Condition {
            field: field.name().to_string(),
            value_type: field.value_type(),
            operator,
            value: value.clone(),
        })
    }
}

/// Reads a stored JSON value the way the field's type declares it.
fn read_scalar(value_type: ValueType, raw: &JsonValue) -> Option<Scalar> {
    match (value_type, raw) {
        (ValueType::Number | ValueType::Reference, JsonValue::Number(n)) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        (ValueType::Date, JsonValue::String(s)) => Scalar::parse_temporal(s),
        (ValueType::Boolean, JsonValue::Bool(b)) => Some(Scalar::Boolean(*b)),
        (_, JsonValue::String(s)) => Some(Scalar::String(s.clone())),
        _ => None,
    }
}

fn evaluate(stored: Option<&Scalar>, operator: OperatorKind, value: &ConditionValue) -> bool {
    if let (OperatorKind::IsNull, ConditionValue::Scalar(Scalar::Boolean(want_null))) =
        (operator, value)
    {
        return stored.is_none() == *want_null;
    }

    let Some(stored) = stored else {
        return false;
    };

    let equals = |other: &Scalar| stored.compare(other) == Some(Ordering::Equal);

    match (operator, value) {
        (OperatorKind::Equals, ConditionValue::Scalar(v)) => equals(v),
        (OperatorKind::NotEquals, ConditionValue::Scalar(v)) => !equals(v),
        (OperatorKind::GreaterThan, ConditionValue::Scalar(v)) => {
            stored.compare(v) == Some(Ordering::Greater)
        }
        (OperatorKind::LessThan, ConditionValue::Scalar(v)) => {
            stored.compare(v) == Some(Ordering::Less)
        }
        (OperatorKind::Contains, ConditionValue::Scalar(Scalar::String(needle))) => stored
            .as_str()
            .is_some_and(|s| s.contains(needle.as_str())),
        (OperatorKind::StartsWith, ConditionValue::Scalar(Scalar::String(prefix))) => stored
            .as_str()
            .is_some_and(|s| s.starts_with(prefix.as_str())),
        (OperatorKind::In, ConditionValue::List(values)) => values.iter().any(equals),
        (OperatorKind::NotIn, ConditionValue::List(values)) => !values.iter().any(equals),
        (OperatorKind::Between, ConditionValue::Pair(low, high)) => {
            matches!(
                stored.compare(low),
                Some(Ordering::Greater | Ordering::Equal)
            ) && matches!(stored.compare(high), Some(Ordering::Less | Ordering::Equal))
        }
        _ => false,
    }
}
