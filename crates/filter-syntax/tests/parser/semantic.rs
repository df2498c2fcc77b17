//! Schema-driven checks on conditions: fields, operators and values.

use filter_syntax::{FilterNode, GroupNode, ValidationCode, parse};
use model::{ConditionValue, OperatorKind, Scalar};
use serde_json::json;

use super::helpers::*;

#[test]
fn test_enum_conditions_under_and() {
    let tree = parse(
        &json!({ "and": [
            { "field": "status", "op": "eq", "value": "open" },
            { "field": "priority", "op": "in", "value": ["high", "critical"] }
        ]}),
        &ticket_schema(),
    )
    .unwrap();

    assert_eq!(
        tree,
        FilterNode::and(vec![
            FilterNode::condition(
                "status",
                OperatorKind::Equals,
                ConditionValue::Scalar(Scalar::from("open"))
            ),
            FilterNode::condition(
                "priority",
                OperatorKind::In,
                ConditionValue::List(vec!["high".into(), "critical".into()])
            ),
        ])
    );
}

#[test]
fn test_between_with_one_bound() {
    let errors = parse(
        &json!({ "field": "age", "op": "between", "value": [10] }),
        &ticket_schema(),
    )
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ValidationCode::ArityMismatch);
    assert!(errors.first().path.segments().is_empty());
}

#[test]
fn test_unknown_field() {
    let errors = parse(
        &json!({ "field": "unknownfield", "op": "eq", "value": 1 }),
        &ticket_schema(),
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::UnknownField]);
}

#[test]
fn test_operator_not_declared_for_field() {
    let schema = ticket_schema();
    let errors = parse(
        &json!({ "field": "status", "op": "contains", "value": "op" }),
        &schema,
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::OperatorNotAllowed]);

    let errors = parse(
        &json!({ "field": "status", "op": "matches", "value": "op" }),
        &schema,
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::OperatorNotAllowed]);
}

#[test]
fn test_inverted_range_has_its_own_code() {
    let errors = parse(
        &json!({ "field": "created", "op": "between", "value": ["2024-05-01", "2024-01-01"] }),
        &ticket_schema(),
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::RangeInverted]);

    assert!(
        parse(
            &json!({ "field": "created", "op": "between", "value": ["2024-05-01", "2024-05-01"] }),
            &ticket_schema(),
        )
        .is_ok()
    );
}

#[test]
fn test_strict_typing() {
    let schema = ticket_schema();
    let cases = [
        json!({ "field": "age", "op": "gt", "value": "5" }),
        json!({ "field": "urgent", "op": "eq", "value": "true" }),
        json!({ "field": "created", "op": "lt", "value": 20240101 }),
        json!({ "field": "priority", "op": "eq", "value": "urgent" }),
        json!({ "field": "title", "op": "eq", "value": null }),
        json!({ "field": "assignee", "op": "eq", "value": { "id": 3 } }),
    ];

    for case in cases {
        let errors = parse(&case, &schema).unwrap_err();
        assert_eq!(errors.codes(), vec![ValidationCode::TypeMismatch], "input: {case}");
    }
}

#[test]
fn test_one_error_per_defective_leaf() {
    let errors = parse(
        &json!({ "and": [
            { "field": "colour", "op": "eq", "value": "red" },
            { "field": "status", "op": "gt", "value": "open" },
            { "field": "age", "op": "gt", "value": "old" },
            { "field": "age", "op": "in", "value": [] },
            { "or": [] },
            { "field": "title", "op": "eq", "value": "fine" }
        ]}),
        &ticket_schema(),
    )
    .unwrap_err();

    assert_eq!(
        summary(&errors),
        vec![
            ("$.and[0]".to_string(), ValidationCode::UnknownField),
            ("$.and[1]".to_string(), ValidationCode::OperatorNotAllowed),
            ("$.and[2]".to_string(), ValidationCode::TypeMismatch),
            ("$.and[3]".to_string(), ValidationCode::ArityMismatch),
            ("$.and[4]".to_string(), ValidationCode::EmptyGroup),
        ]
    );
}

#[test]
fn test_parsed_trees_only_use_allowed_operators() {
    let schema = ticket_schema();
    let tree = parse(
        &json!({ "or": [
            { "field": "assignee", "op": "is_null", "value": false },
            { "field": "priority", "op": "nin", "value": ["low"] }
        ]}),
        &schema,
    )
    .unwrap();

    let FilterNode::Group(GroupNode::Or(children)) = tree else {
        panic!("expected an OR root");
    };
    for child in &children {
        let condition = child.as_condition().unwrap();
        let field = schema.field(&condition.field).unwrap();
        assert!(field.allows(condition.operator));
    }
}

#[test]
fn test_root_path_helper() {
    let errors = parse(&json!({ "and": [] }), &ticket_schema()).unwrap_err();
    assert_eq!(errors.first().path, root());
}
