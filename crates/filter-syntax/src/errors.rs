use crate::ast::path::Path;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    UnknownField,
    OperatorNotAllowed,
    TypeMismatch,
    ArityMismatch,
    EmptyGroup,
    MalformedStructure,
    RangeInverted,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::UnknownField => "unknown_field",
            ValidationCode::OperatorNotAllowed => "operator_not_allowed",
            ValidationCode::TypeMismatch => "type_mismatch",
            ValidationCode::ArityMismatch => "arity_mismatch",
            ValidationCode::EmptyGroup => "empty_group",
            ValidationCode::MalformedStructure => "malformed_structure",
            ValidationCode::RangeInverted => "range_inverted",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{code} at {path}: {message}")]
pub struct ValidationError {
    pub path: Path,
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: Path, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }
}

/// Every problem found in one validation pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationErrors(errors))
        }
    }

    pub fn single(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    pub fn codes(&self) -> Vec<ValidationCode> {
        self.0.iter().map(|e| e.code).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "filter is invalid ({} errors):", self.0.len())?;
        for error in &self.0 {
            writeln!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
