pub mod core {
    pub mod operator;
    pub mod value;
    pub mod value_type;
}

pub mod schema {
    pub mod config;
    pub mod field;
    pub mod model_schema;
    pub mod options;
    pub mod registry;
}

pub mod errors;

pub use crate::core::{
    operator::{Arity, OperatorKind},
    value::{ConditionValue, Scalar},
    value_type::ValueType,
};
pub use errors::{ConfigurationError, RegistryError};
pub use schema::{
    config::SchemaConfig,
    field::{CoercionPolicy, EnumChoice, FieldSpec},
    model_schema::ModelSchema,
    registry::{RegistryHandle, SchemaRegistry},
};
