use crate::core::{operator::OperatorKind, value_type::ValueType};
use thiserror::Error;

/// A schema declaration that cannot be accepted. Raised at configuration
/// time; the application should not start with an inconsistent schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("model '{0}' is already registered")]
    DuplicateModel(String),

    #[error("model '{model}' declares field '{field}' more than once")]
    DuplicateField { model: String, field: String },

    #[error("field '{field}' must declare at least one operator")]
    NoOperators { field: String },

    #[error("operator '{operator}' cannot be used with {value_type} field '{field}'")]
    IncompatibleOperator {
        field: String,
        operator: OperatorKind,
        value_type: ValueType,
    },

    #[error("enum field '{field}' must declare at least one enum value")]
    MissingEnumValues { field: String },

    #[error("field '{field}' is not an enum but declares enum values")]
    UnexpectedEnumValues { field: String },

    #[error("enum field '{field}' declares value '{value}' more than once")]
    DuplicateEnumValue { field: String, value: String },

    #[error("default operator '{operator}' of field '{field}' is not one of its operators")]
    DefaultOperatorNotAllowed {
        field: String,
        operator: OperatorKind,
    },

    #[error("label given for operator '{operator}' which field '{field}' does not allow")]
    LabelForUnknownOperator {
        field: String,
        operator: OperatorKind,
    },

    #[error("field name must not be empty in model '{model}'")]
    EmptyFieldName { model: String },

    #[error("invalid schema configuration: {0}")]
    Invalid(String),

    #[error("failed to read schema configuration: {0}")]
    Read(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
