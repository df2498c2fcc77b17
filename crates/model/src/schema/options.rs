//! Front-end description of a model's filterable fields: which operators are
//! offered for each field, how to label them and what kind of input widget a
//! value needs.

use crate::{
    core::{operator::OperatorKind, value_type::ValueType},
    schema::{field::FieldSpec, model_schema::ModelSchema},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Input,
    Choice,
    Toggle,
}

impl InputKind {
    pub fn tag(&self) -> &'static str {
        match self {
            InputKind::Input => "input",
            InputKind::Choice => "choice",
            InputKind::Toggle => "toggle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorOptions {
    pub label: String,
    pub input: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<(String, String)>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOptions {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub default_operator: OperatorKind,
    /// Keyed by operator wire name, in the field's declared operator order.
    pub operators: Vec<(OperatorKind, OperatorOptions)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOptions {
    pub model: String,
    pub fields: Vec<FieldOptions>,
}

impl ModelSchema {
    pub fn describe(&self) -> ModelOptions {
        ModelOptions {
            model: self.name().to_string(),
            fields: self.fields().iter().map(FieldSpec::describe).collect(),
        }
    }
}

impl FieldSpec {
    pub fn describe(&self) -> FieldOptions {
        let operators = self
            .operators()
            .iter()
            .map(|&op| (op, self.describe_operator(op)))
            .collect();

        FieldOptions {
            name: self.name().to_string(),
            label: self.label().to_string(),
            description: self.description().map(str::to_string),
            value_type: self.value_type(),
            default_operator: self.default_operator(),
            operators,
        }
    }

    fn describe_operator(&self, op: OperatorKind) -> OperatorOptions {
        let input = input_kind(self.value_type(), op);
        let choices = (input == InputKind::Choice).then(|| {
            self.enum_choices()
                .iter()
                .map(|c| (c.value.clone(), c.display_label().to_string()))
                .collect()
        });

        OperatorOptions {
            label: self.operator_label(op).to_string(),
            input,
            choices,
        }
    }
}

fn input_kind(value_type: ValueType, op: OperatorKind) -> InputKind {
    match (value_type, op) {
        (_, OperatorKind::IsNull) => InputKind::Toggle,
        (ValueType::Boolean, OperatorKind::Equals | OperatorKind::NotEquals) => InputKind::Toggle,
        (
            ValueType::Enum,
            OperatorKind::Equals | OperatorKind::NotEquals | OperatorKind::In | OperatorKind::NotIn,
        ) => InputKind::Choice,
        _ => InputKind::Input,
    }
}

impl OperatorOptions {
    /// `{ label, input, choices? }`, choices as `[value, label]` pairs.
    pub fn to_json(&self) -> serde_json::Value {
        let mut entry = serde_json::Map::new();
        entry.insert("label".into(), self.label.clone().into());
        entry.insert("input".into(), self.input.tag().into());
        if let Some(choices) = &self.choices {
            let pairs = choices
                .iter()
                .map(|(value, label)| serde_json::json!([value, label]))
                .collect();
            entry.insert("choices".into(), serde_json::Value::Array(pairs));
        }
        serde_json::Value::Object(entry)
    }
}

impl ModelOptions {
    /// JSON object form: `{ field: { label, type, default_operator, operators: { op: {...} } } }`.
    /// Fields and operators keep their declaration order.
    pub fn to_json(&self) -> serde_json::Value {
        let mut fields = serde_json::Map::new();
        for field in &self.fields {
            let mut operators = serde_json::Map::new();
            for (op, options) in &field.operators {
                operators.insert(op.wire_name().to_string(), options.to_json());
            }

            let mut entry = serde_json::Map::new();
            entry.insert("label".into(), field.label.clone().into());
            if let Some(description) = &field.description {
                entry.insert("description".into(), description.clone().into());
            }
            entry.insert("type".into(), field.value_type.tag().into());
            entry.insert(
                "default_operator".into(),
                field.default_operator.wire_name().into(),
            );
            entry.insert("operators".into(), serde_json::Value::Object(operators));

            fields.insert(field.name.clone(), serde_json::Value::Object(entry));
        }
        serde_json::Value::Object(fields)
    }
}
