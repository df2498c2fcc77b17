//! Turns a validated filter tree into a backend predicate.

use crate::{
    error::CompilationError,
    predicate::{BooleanPredicate, PredicateBuilder},
    simplify::simplify,
};
use filter_syntax::{ConditionNode, FilterNode, GroupNode, Path};
use model::{Arity, ConditionValue, FieldSpec, ModelSchema, OperatorKind, Scalar, ValueType};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Flatten nested groups and drop double negations before compiling.
    /// Error paths then refer to the simplified tree.
    pub simplify: bool,
}

/// Compiles `tree` with default options.
pub fn compile<B: PredicateBuilder>(
    tree: &FilterNode,
    schema: &ModelSchema,
    builder: &B,
) -> Result<B::Predicate, CompilationError> {
    Compiler::new(schema, builder).compile(tree)
}

pub struct Compiler<'a, B> {
    schema: &'a ModelSchema,
    builder: &'a B,
    options: CompileOptions,
}

impl<'a, B: PredicateBuilder> Compiler<'a, B> {
    pub fn new(schema: &'a ModelSchema, builder: &'a B) -> Self {
        Self::with_options(schema, builder, CompileOptions::default())
    }

    pub fn with_options(schema: &'a ModelSchema, builder: &'a B, options: CompileOptions) -> Self {
        Self {
            schema,
            builder,
            options,
        }
    }

    pub fn compile(&self, tree: &FilterNode) -> Result<B::Predicate, CompilationError> {
        let result = if self.options.simplify {
            let simplified = simplify(tree);
            debug!(
                before = tree.node_count(),
                after = simplified.node_count(),
                "Simplified filter tree"
            );
            self.compile_node(&simplified, &Path::root())
        } else {
            self.compile_node(tree, &Path::root())
        };

        match &result {
            Ok(_) => debug!(model = self.schema.name(), "Compiled filter tree"),
            Err(e) => error!(model = self.schema.name(), path = %e.path(), "Filter compilation failed: {e}"),
        }
        result
    }

    fn compile_node(&self, node: &FilterNode, path: &Path) -> Result<B::Predicate, CompilationError> {
        match node {
            FilterNode::Condition(condition) => self.compile_condition(condition, path),
            FilterNode::Group(GroupNode::And(children)) => {
                let compiled = self.compile_children(children, &path.key("and"), path)?;
                Ok(<B::Predicate as BooleanPredicate>::and(compiled))
            }
            FilterNode::Group(GroupNode::Or(children)) => {
                let compiled = self.compile_children(children, &path.key("or"), path)?;
                Ok(<B::Predicate as BooleanPredicate>::or(compiled))
            }
            FilterNode::Group(GroupNode::Not(inner)) => {
                let compiled = self.compile_node(inner, &path.key("not"))?;
                Ok(<B::Predicate as BooleanPredicate>::not(compiled))
            }
        }
    }

    fn compile_children(
        &self,
        children: &[FilterNode],
        group_path: &Path,
        path: &Path,
    ) -> Result<Vec<B::Predicate>, CompilationError> {
        if children.is_empty() {
            return Err(CompilationError::ContractViolation {
                path: path.clone(),
                reason: "group has no children".to_string(),
            });
        }

        children
            .iter()
            .enumerate()
            .map(|(i, child)| self.compile_node(child, &group_path.index(i)))
            .collect()
    }

    fn compile_condition(
        &self,
        condition: &ConditionNode,
        path: &Path,
    ) -> Result<B::Predicate, CompilationError> {
        let field = self.schema.field(&condition.field).ok_or_else(|| {
            CompilationError::ContractViolation {
                path: path.clone(),
                reason: format!(
                    "field '{}' is not declared on model '{}'",
                    condition.field,
                    self.schema.name()
                ),
            }
        })?;

        if !field.allows(condition.operator) {
            return Err(CompilationError::ContractViolation {
                path: path.clone(),
                reason: format!(
                    "operator '{}' is not allowed for field '{}'",
                    condition.operator, condition.field
                ),
            });
        }

        if let Err(reason) = check_value(field, condition.operator, &condition.value) {
            return Err(CompilationError::ContractViolation {
                path: path.clone(),
                reason,
            });
        }

        self.builder
            .build(field, condition.operator, &condition.value)
            .map_err(|e| CompilationError::Backend {
                path: path.clone(),
                field: condition.field.clone(),
                operator: condition.operator,
                source: Box::new(e),
            })
    }
}

/// The value must have the operator's arity and the field's type.
fn check_value(
    field: &FieldSpec,
    operator: OperatorKind,
    value: &ConditionValue,
) -> Result<(), String> {
    let scalars = match (operator.arity(), value) {
        (Arity::Single, ConditionValue::Scalar(v)) => vec![v],
        (Arity::List, ConditionValue::List(values)) if !values.is_empty() => {
            values.iter().collect()
        }
        (Arity::Pair, ConditionValue::Pair(low, high)) => vec![low, high],
        (Arity::Flag, ConditionValue::Scalar(Scalar::Boolean(_))) => return Ok(()),
        (arity, _) => {
            return Err(format!(
                "operator '{operator}' expects {arity}, got {value}"
            ));
        }
    };

    match scalars.into_iter().find(|v| !fits(field, v)) {
        Some(v) => Err(format!(
            "{} value {v} does not fit {} field '{}'",
            v.kind_name(),
            field.value_type(),
            field.name()
        )),
        None => Ok(()),
    }
}

fn fits(field: &FieldSpec, value: &Scalar) -> bool {
    match (field.value_type(), value) {
        (ValueType::String, Scalar::String(_)) => true,
        (ValueType::Enum, Scalar::String(s)) => field.is_enum_value(s),
        (ValueType::Number, Scalar::Int(_) | Scalar::Float(_)) => true,
        (ValueType::Boolean, Scalar::Boolean(_)) => true,
        (ValueType::Date, Scalar::Date(_) | Scalar::DateTime(_)) => true,
        (ValueType::Reference, Scalar::Int(_)) => true,
        (ValueType::Reference, Scalar::String(s)) => !s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{ConditionValue, FieldSpec, OperatorKind, Scalar, ValueType};
    use std::{cell::RefCell, fmt};
    use tracing_test::traced_test;

    #[derive(Debug, Clone, PartialEq)]
    enum Expr {
        Leaf(String),
        And(Vec<Expr>),
        Or(Vec<Expr>),
        Not(Box<Expr>),
    }

    impl BooleanPredicate for Expr {
        fn and(children: Vec<Self>) -> Self {
            Expr::And(children)
        }

        fn or(children: Vec<Self>) -> Self {
            Expr::Or(children)
        }

        fn not(inner: Self) -> Self {
            Expr::Not(Box::new(inner))
        }
    }

    #[derive(Debug)]
    struct Unsupported;

    impl fmt::Display for Unsupported {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "operator not supported")
        }
    }

    impl std::error::Error for Unsupported {}

    /// Records every build call; refuses `startswith`.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, OperatorKind, ConditionValue)>>,
    }

    impl PredicateBuilder for Recorder {
        type Predicate = Expr;
        type Error = Unsupported;

        fn build(
            &self,
            field: &FieldSpec,
            operator: OperatorKind,
            value: &ConditionValue,
        ) -> Result<Expr, Unsupported> {
            self.calls
                .borrow_mut()
                .push((field.name().to_string(), operator, value.clone()));
            if operator == OperatorKind::StartsWith {
                return Err(Unsupported);
            }
            Ok(Expr::Leaf(format!("{} {} {}", field.name(), operator, value)))
        }
    }

    fn schema() -> ModelSchema {
        ModelSchema::new(
            "ticket",
            [
                FieldSpec::builder("status", ValueType::Enum)
                    .operators([OperatorKind::Equals, OperatorKind::In])
                    .enum_values(["open", "closed"])
                    .build()
                    .unwrap(),
                FieldSpec::builder("title", ValueType::String)
                    .operators([OperatorKind::Equals, OperatorKind::StartsWith])
                    .build()
                    .unwrap(),
            ],
        )
        .unwrap()
    }

    fn status_is(value: &str) -> FilterNode {
        FilterNode::condition(
            "status",
            OperatorKind::Equals,
            ConditionValue::Scalar(Scalar::from(value)),
        )
    }

    #[test]
    fn test_equals_builds_exactly_once() {
        let schema = schema();
        let recorder = Recorder::default();

        let predicate = compile(&status_is("open"), &schema, &recorder).unwrap();

        assert_eq!(predicate, Expr::Leaf("status eq \"open\"".into()));
        assert_eq!(
            recorder.calls.borrow().as_slice(),
            &[(
                "status".to_string(),
                OperatorKind::Equals,
                ConditionValue::Scalar(Scalar::from("open"))
            )]
        );
    }

    #[test]
    fn test_groups_keep_child_order() {
        let schema = schema();
        let tree = FilterNode::or(vec![
            status_is("open"),
            FilterNode::not(status_is("closed")),
        ]);

        let predicate = compile(&tree, &schema, &Recorder::default()).unwrap();
        assert_eq!(
            predicate,
            Expr::Or(vec![
                Expr::Leaf("status eq \"open\"".into()),
                Expr::Not(Box::new(Expr::Leaf("status eq \"closed\"".into()))),
            ])
        );
    }

    #[traced_test]
    #[test]
    fn test_backend_failure_names_field_operator_and_path() {
        let schema = schema();
        let tree = FilterNode::and(vec![
            status_is("open"),
            FilterNode::condition(
                "title",
                OperatorKind::StartsWith,
                ConditionValue::Scalar(Scalar::from("Re:")),
            ),
        ]);

        let err = compile(&tree, &schema, &Recorder::default()).unwrap_err();
        match &err {
            CompilationError::Backend {
                path,
                field,
                operator,
                ..
            } => {
                assert_eq!(path.to_string(), "$.and[1]");
                assert_eq!(field, "title");
                assert_eq!(*operator, OperatorKind::StartsWith);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.public_message(), "The filter could not be applied.");
        assert!(logs_contain("Filter compilation failed"));
    }

    #[traced_test]
    #[test]
    fn test_hand_built_trees_are_checked() {
        let schema = schema();
        let recorder = Recorder::default();

        let unknown = FilterNode::condition(
            "colour",
            OperatorKind::Equals,
            ConditionValue::Scalar(Scalar::from("red")),
        );
        assert!(
            compile(&unknown, &schema, &recorder)
                .unwrap_err()
                .is_contract_violation()
        );

        let disallowed = FilterNode::condition(
            "status",
            OperatorKind::NotEquals,
            ConditionValue::Scalar(Scalar::from("open")),
        );
        assert!(
            compile(&disallowed, &schema, &recorder)
                .unwrap_err()
                .is_contract_violation()
        );

        let empty = FilterNode::not(FilterNode::and(vec![]));
        let err = compile(&empty, &schema, &recorder).unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(err.path().to_string(), "$.not");

        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_values_must_match_operator_and_field() {
        let schema = schema();
        let recorder = Recorder::default();
        let malformed = [
            FilterNode::condition(
                "status",
                OperatorKind::In,
                ConditionValue::Scalar(Scalar::from("open")),
            ),
            FilterNode::condition("status", OperatorKind::In, ConditionValue::List(vec![])),
            FilterNode::condition(
                "status",
                OperatorKind::Equals,
                ConditionValue::Scalar(Scalar::Int(3)),
            ),
            FilterNode::condition(
                "status",
                OperatorKind::Equals,
                ConditionValue::Scalar(Scalar::from("pending")),
            ),
            FilterNode::condition(
                "title",
                OperatorKind::Equals,
                ConditionValue::Pair(Scalar::from("a"), Scalar::from("b")),
            ),
        ];

        for tree in &malformed {
            let err = compile(tree, &schema, &recorder).unwrap_err();
            assert!(err.is_contract_violation(), "{tree}: {err}");
        }
        assert!(recorder.calls.borrow().is_empty());

        let numbers = ModelSchema::new(
            "ticket",
            [FieldSpec::builder("age", ValueType::Number).build().unwrap()],
        )
        .unwrap();
        let between_scalar = FilterNode::not(FilterNode::condition(
            "age",
            OperatorKind::Between,
            ConditionValue::Scalar(Scalar::Int(5)),
        ));
        let err = compile(&between_scalar, &numbers, &recorder).unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(err.path().to_string(), "$.not");

        let flag_text = FilterNode::condition(
            "age",
            OperatorKind::IsNull,
            ConditionValue::Scalar(Scalar::from("yes")),
        );
        assert!(
            compile(&flag_text, &numbers, &recorder)
                .unwrap_err()
                .is_contract_violation()
        );

        let between = FilterNode::condition(
            "age",
            OperatorKind::Between,
            ConditionValue::Pair(Scalar::Int(1), Scalar::Float(2.5)),
        );
        assert!(compile(&between, &numbers, &recorder).is_ok());
    }

    #[test]
    fn test_simplify_option() {
        let schema = schema();
        let tree = FilterNode::and(vec![FilterNode::not(FilterNode::not(status_is("open")))]);

        let plain = compile(&tree, &schema, &Recorder::default()).unwrap();
        assert!(matches!(plain, Expr::And(_)));

        let recorder = Recorder::default();
        let compiler =
            Compiler::with_options(&schema, &recorder, CompileOptions { simplify: true });
        assert_eq!(
            compiler.compile(&tree).unwrap(),
            Expr::Leaf("status eq \"open\"".into())
        );

        let hidden_empty = FilterNode::and(vec![status_is("open"), FilterNode::and(vec![])]);
        for simplify in [false, true] {
            let err = Compiler::with_options(&schema, &recorder, CompileOptions { simplify })
                .compile(&hidden_empty)
                .unwrap_err();
            assert!(err.is_contract_violation());
            assert_eq!(err.path().to_string(), "$.and[1]");
        }
    }
}
