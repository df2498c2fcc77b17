use model::OperatorKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SqlBuildError {
    /// Strict column mapping is enabled and the field has no column.
    #[error("no column mapped for field '{0}'")]
    UnmappedField(String),

    #[error("operator '{operator}' cannot take value {value}")]
    UnexpectedValue { operator: OperatorKind, value: String },
}
