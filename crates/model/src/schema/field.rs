use crate::{
    core::{operator::OperatorKind, value_type::ValueType},
    errors::ConfigurationError,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How strictly raw input values are matched against a field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// A value of the wrong primitive kind is rejected.
    #[default]
    Strict,
    /// Number fields additionally accept strings holding a number.
    NumericStrings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumChoice {
    pub value: String,
    pub label: Option<String>,
}

impl EnumChoice {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labelled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

impl From<&str> for EnumChoice {
    fn from(value: &str) -> Self {
        EnumChoice::new(value)
    }
}

impl From<String> for EnumChoice {
    fn from(value: String) -> Self {
        EnumChoice::new(value)
    }
}

/// Declaration of one filterable field. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    value_type: ValueType,
    operators: Vec<OperatorKind>,
    enum_values: Vec<EnumChoice>,
    label: String,
    description: Option<String>,
    default_operator: OperatorKind,
    operator_labels: BTreeMap<OperatorKind, String>,
    coercion: CoercionPolicy,
}

impl FieldSpec {
    pub fn builder(name: impl Into<String>, value_type: ValueType) -> FieldSpecBuilder {
        FieldSpecBuilder::new(name, value_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Allowed operators in declaration order.
    pub fn operators(&self) -> &[OperatorKind] {
        &self.operators
    }

    pub fn allows(&self, operator: OperatorKind) -> bool {
        self.operators.contains(&operator)
    }

    pub fn enum_choices(&self) -> &[EnumChoice] {
        &self.enum_values
    }

    pub fn enum_values(&self) -> impl Iterator<Item = &str> {
        self.enum_values.iter().map(|choice| choice.value.as_str())
    }

    pub fn is_enum_value(&self, value: &str) -> bool {
        self.enum_values.iter().any(|choice| choice.value == value)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_operator(&self) -> OperatorKind {
        self.default_operator
    }

    pub fn operator_label(&self, operator: OperatorKind) -> &str {
        self.operator_labels
            .get(&operator)
            .map(String::as_str)
            .unwrap_or_else(|| operator.default_label())
    }

    pub fn coercion(&self) -> CoercionPolicy {
        self.coercion
    }
}

pub struct FieldSpecBuilder {
    name: String,
    value_type: ValueType,
    operators: Option<Vec<OperatorKind>>,
    enum_values: Vec<EnumChoice>,
    label: Option<String>,
    description: Option<String>,
    default_operator: Option<OperatorKind>,
    operator_labels: BTreeMap<OperatorKind, String>,
    coercion: CoercionPolicy,
}

impl FieldSpecBuilder {
    fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            operators: None,
            enum_values: Vec::new(),
            label: None,
            description: None,
            default_operator: None,
            operator_labels: BTreeMap::new(),
            coercion: CoercionPolicy::Strict,
        }
    }

    /// Restricts the field to these operators. When never called, every
    /// operator compatible with the field's type is allowed.
    pub fn operators(mut self, operators: impl IntoIterator<Item = OperatorKind>) -> Self {
        let mut ordered = Vec::new();
        for op in operators {
            if !ordered.contains(&op) {
                ordered.push(op);
            }
        }
        self.operators = Some(ordered);
        self
    }

    pub fn enum_values<I, C>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<EnumChoice>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_operator(mut self, operator: OperatorKind) -> Self {
        self.default_operator = Some(operator);
        self
    }

    pub fn operator_label(mut self, operator: OperatorKind, label: impl Into<String>) -> Self {
        self.operator_labels.insert(operator, label.into());
        self
    }

    pub fn coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn build(self) -> Result<FieldSpec, ConfigurationError> {
        let operators = self
            .operators
            .unwrap_or_else(|| OperatorKind::compatible_with(self.value_type));

        if operators.is_empty() {
            return Err(ConfigurationError::NoOperators { field: self.name });
        }

        if let Some(op) = operators
            .iter()
            .find(|op| !op.is_compatible_with(self.value_type))
        {
            return Err(ConfigurationError::IncompatibleOperator {
                field: self.name,
                operator: *op,
                value_type: self.value_type,
            });
        }

        validate_enum_values(&self.name, self.value_type, &self.enum_values)?;

        let default_operator = self.default_operator.unwrap_or(operators[0]);
        if !operators.contains(&default_operator) {
            return Err(ConfigurationError::DefaultOperatorNotAllowed {
                field: self.name,
                operator: default_operator,
            });
        }

        if let Some(op) = self
            .operator_labels
            .keys()
            .find(|op| !operators.contains(op))
        {
            return Err(ConfigurationError::LabelForUnknownOperator {
                field: self.name,
                operator: *op,
            });
        }

        let label = self.label.unwrap_or_else(|| humanize(&self.name));

        Ok(FieldSpec {
            name: self.name,
            value_type: self.value_type,
            operators,
            enum_values: self.enum_values,
            label,
            description: self.description,
            default_operator,
            operator_labels: self.operator_labels,
            coercion: self.coercion,
        })
    }
}

fn validate_enum_values(
    field: &str,
    value_type: ValueType,
    values: &[EnumChoice],
) -> Result<(), ConfigurationError> {
    if value_type != ValueType::Enum {
        if !values.is_empty() {
            return Err(ConfigurationError::UnexpectedEnumValues {
                field: field.to_string(),
            });
        }
        return Ok(());
    }

    if values.is_empty() {
        return Err(ConfigurationError::MissingEnumValues {
            field: field.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for choice in values {
        if !seen.insert(choice.value.as_str()) {
            return Err(ConfigurationError::DuplicateEnumValue {
                field: field.to_string(),
                value: choice.value.clone(),
            });
        }
    }
    Ok(())
}

/// `created_at` -> `Created at`
fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
