use filter_syntax::{Path, ValidationCode, ValidationErrors};
use model::{FieldSpec, ModelSchema, OperatorKind, ValueType};

/// Ticket schema shared by the parser tests
pub fn ticket_schema() -> ModelSchema {
    ModelSchema::new(
        "ticket",
        [
            FieldSpec::builder("status", ValueType::Enum)
                .operators([OperatorKind::Equals, OperatorKind::NotEquals, OperatorKind::In])
                .enum_values(["open", "closed"])
                .build()
                .unwrap(),
            FieldSpec::builder("priority", ValueType::Enum)
                .operators([OperatorKind::Equals, OperatorKind::In, OperatorKind::NotIn])
                .enum_values(["low", "medium", "high", "critical"])
                .build()
                .unwrap(),
            FieldSpec::builder("title", ValueType::String)
                .operators([
                    OperatorKind::Equals,
                    OperatorKind::Contains,
                    OperatorKind::StartsWith,
                ])
                .build()
                .unwrap(),
            FieldSpec::builder("age", ValueType::Number).build().unwrap(),
            FieldSpec::builder("urgent", ValueType::Boolean).build().unwrap(),
            FieldSpec::builder("created", ValueType::Date).build().unwrap(),
            FieldSpec::builder("assignee", ValueType::Reference)
                .operators([OperatorKind::Equals, OperatorKind::In, OperatorKind::IsNull])
                .build()
                .unwrap(),
        ],
    )
    .unwrap()
}

/// (path, code) pairs in reported order
pub fn summary(errors: &ValidationErrors) -> Vec<(String, ValidationCode)> {
    errors
        .iter()
        .map(|e| (e.path.to_string(), e.code))
        .collect()
}

pub fn root() -> Path {
    Path::root()
}
