use crate::sql::{
    error::SqlBuildError,
    predicate::{CompareOp, SqlPredicate},
};
use compiler::PredicateBuilder;
use model::{ConditionValue, FieldSpec, OperatorKind, Scalar};
use std::collections::HashMap;

/// Builds [`SqlPredicate`]s, mapping filter fields onto table columns.
///
/// Unmapped fields use their own name as the column unless the builder is
/// strict, in which case they are rejected.
#[derive(Debug, Clone, Default)]
pub struct SqlPredicateBuilder {
    columns: HashMap<String, String>,
    strict: bool,
}

impl SqlPredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn column_for(&self, field: &str) -> Result<String, SqlBuildError> {
        match self.columns.get(field) {
            Some(column) => Ok(column.clone()),
            None if self.strict => Err(SqlBuildError::UnmappedField(field.to_string())),
            None => Ok(field.to_string()),
        }
    }
}

impl PredicateBuilder for SqlPredicateBuilder {
    type Predicate = SqlPredicate;
    type Error = SqlBuildError;

    fn build(
        &self,
        field: &FieldSpec,
        operator: OperatorKind,
        value: &ConditionValue,
    ) -> Result<SqlPredicate, SqlBuildError> {
        let column = self.column_for(field.name())?;
        let unexpected = || SqlBuildError::UnexpectedValue {
            operator,
            value: value.to_string(),
        };

        let predicate = match (operator, value) {
            (OperatorKind::Equals, ConditionValue::Scalar(v)) => compare(column, CompareOp::Eq, v),
            (OperatorKind::NotEquals, ConditionValue::Scalar(v)) => {
                compare(column, CompareOp::NotEq, v)
            }
            (OperatorKind::GreaterThan, ConditionValue::Scalar(v)) => {
                compare(column, CompareOp::Gt, v)
            }
            (OperatorKind::LessThan, ConditionValue::Scalar(v)) => compare(column, CompareOp::Lt, v),
            (OperatorKind::Contains, ConditionValue::Scalar(Scalar::String(text))) => {
                SqlPredicate::Like {
                    column,
                    pattern: format!("%{}%", escape_like(text)),
                }
            }
            (OperatorKind::StartsWith, ConditionValue::Scalar(Scalar::String(text))) => {
                SqlPredicate::Like {
                    column,
                    pattern: format!("{}%", escape_like(text)),
                }
            }
            (OperatorKind::In, ConditionValue::List(values)) if !values.is_empty() => {
                SqlPredicate::InList {
                    column,
                    values: values.clone(),
                    negated: false,
                }
            }
            (OperatorKind::NotIn, ConditionValue::List(values)) if !values.is_empty() => {
                SqlPredicate::InList {
                    column,
                    values: values.clone(),
                    negated: true,
                }
            }
            (OperatorKind::Between, ConditionValue::Pair(low, high)) => SqlPredicate::Between {
                column,
                low: low.clone(),
                high: high.clone(),
            },
            (OperatorKind::IsNull, ConditionValue::Scalar(Scalar::Boolean(is_null))) => {
                SqlPredicate::IsNull {
                    column,
                    negated: !is_null,
                }
            }
            _ => return Err(unexpected()),
        };

        Ok(predicate)
    }
}

fn compare(column: String, op: CompareOp, value: &Scalar) -> SqlPredicate {
    SqlPredicate::Compare {
        column,
        op,
        value: value.clone(),
    }
}

/// Escapes LIKE wildcards so user text only ever matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
