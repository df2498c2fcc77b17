//! Structural tests: which JSON shapes are groups, conditions or malformed.

use filter_syntax::{FilterNode, GroupNode, PathSegment, ValidationCode, parse};
use model::{ConditionValue, OperatorKind, Scalar};
use serde_json::json;

use super::helpers::*;

#[test]
fn test_parse_single_condition() {
    let schema = ticket_schema();
    let tree = parse(
        &json!({ "field": "title", "op": "contains", "value": "crash" }),
        &schema,
    )
    .unwrap();

    assert_eq!(
        tree,
        FilterNode::condition(
            "title",
            OperatorKind::Contains,
            ConditionValue::Scalar(Scalar::from("crash"))
        )
    );
}

#[test]
fn test_parse_nested_groups() {
    let schema = ticket_schema();
    let tree = parse(
        &json!({ "or": [
            { "and": [
                { "field": "status", "op": "eq", "value": "open" },
                { "field": "urgent", "op": "eq", "value": true }
            ]},
            { "not": { "field": "assignee", "op": "isnull", "value": true } }
        ]}),
        &schema,
    )
    .unwrap();

    let FilterNode::Group(GroupNode::Or(children)) = &tree else {
        panic!("expected an OR root, got {tree:?}");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(children[0], FilterNode::Group(GroupNode::And(ref c)) if c.len() == 2));
    assert!(matches!(children[1], FilterNode::Group(GroupNode::Not(_))));
    assert_eq!(tree.depth(), 3);
}

#[test]
fn test_empty_or_group() {
    let errors = parse(&json!({ "or": [] }), &ticket_schema()).unwrap_err();
    assert_eq!(summary(&errors), vec![("$".to_string(), ValidationCode::EmptyGroup)]);
}

#[test]
fn test_group_with_extra_key_is_malformed() {
    let errors = parse(
        &json!({ "and": [{ "field": "age", "op": "gt", "value": 1 }], "limit": 5 }),
        &ticket_schema(),
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::MalformedStructure]);
}

#[test]
fn test_group_needs_array() {
    let errors = parse(
        &json!({ "and": { "field": "age", "op": "gt", "value": 1 } }),
        &ticket_schema(),
    )
    .unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::MalformedStructure]);
}

#[test]
fn test_condition_shape_errors() {
    let schema = ticket_schema();
    let cases = [
        json!({ "field": "age", "op": "gt" }),
        json!({ "field": "age", "op": "gt", "value": 1, "extra": true }),
        json!({ "field": 3, "op": "gt", "value": 1 }),
        json!({ "field": "age", "op": null, "value": 1 }),
        json!("age > 1"),
        json!(null),
    ];

    for case in cases {
        let errors = parse(&case, &schema).unwrap_err();
        assert_eq!(
            errors.codes(),
            vec![ValidationCode::MalformedStructure],
            "input: {case}"
        );
    }
}

#[test]
fn test_not_with_two_children_reports_arity_and_child_errors() {
    let errors = parse(
        &json!({ "not": [
            { "field": "age", "op": "gt", "value": 1 },
            { "field": "colour", "op": "eq", "value": "red" }
        ]}),
        &ticket_schema(),
    )
    .unwrap_err();

    assert_eq!(
        summary(&errors),
        vec![
            ("$.not[1]".to_string(), ValidationCode::UnknownField),
            ("$".to_string(), ValidationCode::ArityMismatch),
        ]
    );
}

#[test]
fn test_not_with_empty_array() {
    let errors = parse(&json!({ "not": [] }), &ticket_schema()).unwrap_err();
    assert_eq!(errors.codes(), vec![ValidationCode::ArityMismatch]);
}

#[test]
fn test_child_paths() {
    let errors = parse(
        &json!({ "and": [
            { "field": "age", "op": "gt", "value": 1 },
            { "not": { "field": "nope", "op": "eq", "value": 1 } }
        ]}),
        &ticket_schema(),
    )
    .unwrap_err();

    let error = errors.first();
    assert_eq!(
        error.path.segments(),
        &[
            PathSegment::Key("and".into()),
            PathSegment::Index(1),
            PathSegment::Key("not".into()),
        ]
    );
}
