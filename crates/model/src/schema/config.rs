//! Declarative schema configuration, as supplied by the embedding application.
//!
//! ```json
//! { "models": { "ticket": { "fields": [
//!     { "name": "status", "type": "enum", "operators": ["eq", "in"],
//!       "enum_values": ["open", { "value": "closed", "label": "Closed" }] }
//! ] } } }
//! ```

use crate::{
    core::{operator::OperatorKind, value_type::ValueType},
    errors::ConfigurationError,
    schema::{
        field::{CoercionPolicy, EnumChoice, FieldSpec},
        model_schema::ModelSchema,
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub models: BTreeMap<String, ModelConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Omitted means every operator compatible with `type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<OperatorKind>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValueConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<OperatorKind>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operator_labels: BTreeMap<OperatorKind, String>,
    #[serde(default)]
    pub coercion: CoercionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValueConfig {
    Plain(String),
    Labelled {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<EnumValueConfig> for EnumChoice {
    fn from(config: EnumValueConfig) -> Self {
        match config {
            EnumValueConfig::Plain(value) => EnumChoice::new(value),
            EnumValueConfig::Labelled { value, label } => EnumChoice { value, label },
        }
    }
}

impl SchemaConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(source).map_err(|e| ConfigurationError::Invalid(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Read(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&source)
    }

    /// Builds every configured model, in model-name order.
    pub fn into_model_schemas(self) -> Result<Vec<(String, ModelSchema)>, ConfigurationError> {
        self.models
            .into_iter()
            .map(|(name, model)| {
                let schema = model.into_schema(&name)?;
                Ok((name, schema))
            })
            .collect()
    }
}

impl ModelConfig {
    pub fn into_schema(self, model_name: &str) -> Result<ModelSchema, ConfigurationError> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldConfig::into_field_spec)
            .collect::<Result<Vec<_>, _>>()?;
        ModelSchema::new(model_name, fields)
    }
}

impl FieldConfig {
    pub fn into_field_spec(self) -> Result<FieldSpec, ConfigurationError> {
        let mut builder = FieldSpec::builder(self.name, self.value_type)
            .enum_values(self.enum_values)
            .coercion(self.coercion);

        if let Some(operators) = self.operators {
            builder = builder.operators(operators);
        }
        if let Some(label) = self.label {
            builder = builder.label(label);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(op) = self.default_operator {
            builder = builder.default_operator(op);
        }
        for (op, label) in self.operator_labels {
            builder = builder.operator_label(op, label);
        }

        builder.build()
    }
}
