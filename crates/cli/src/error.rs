use compiler::CompilationError;
use filter_syntax::ValidationErrors;
use model::{ConfigurationError, RegistryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid schema configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("Filter document is not valid JSON: {0}")]
    FilterDeserialize(#[from] serde_json::Error),

    #[error("Filter is invalid ({} errors)", .0.len())]
    InvalidFilter(ValidationErrors),

    #[error("Filter '{0}' did not pass validation")]
    Rejected(String),

    #[error("Failed to compile filter: {0}")]
    Compilation(#[from] CompilationError),

    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    #[error("Invalid column mapping '{0}', expected FIELD=COLUMN")]
    InvalidColumnMapping(String),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
