//! serialize/parse round trip over generated trees.

use chrono::{DateTime, NaiveDate, Utc};
use filter_syntax::{FilterNode, parse, serialize};
use model::{ConditionValue, OperatorKind, Scalar};
use proptest::prelude::*;
use serde_json::json;

use super::helpers::*;

fn arb_priority() -> impl Strategy<Value = Scalar> {
    prop_oneof![Just("low"), Just("medium"), Just("high"), Just("critical")].prop_map(Scalar::from)
}

fn arb_number() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i64>().prop_map(Scalar::Int),
        (-1.0e9f64..1.0e9).prop_map(Scalar::Float),
    ]
}

fn arb_date() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        (1990i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            Scalar::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
        }),
        (0i64..4_102_444_800).prop_map(|secs| {
            Scalar::DateTime(DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default())
        }),
    ]
}

fn sorted_pair(a: Scalar, b: Scalar) -> ConditionValue {
    if a.compare(&b) == Some(std::cmp::Ordering::Greater) {
        ConditionValue::Pair(b, a)
    } else {
        ConditionValue::Pair(a, b)
    }
}

fn arb_condition() -> impl Strategy<Value = FilterNode> {
    prop_oneof![
        prop_oneof![Just("open"), Just("closed")].prop_map(|s| {
            FilterNode::condition("status", OperatorKind::NotEquals, ConditionValue::Scalar(s.into()))
        }),
        prop::collection::vec(arb_priority(), 1..4).prop_map(|values| {
            FilterNode::condition("priority", OperatorKind::NotIn, ConditionValue::List(values))
        }),
        "[a-zA-Z0-9 %_\\\\]{0,12}".prop_map(|s| {
            FilterNode::condition("title", OperatorKind::StartsWith, ConditionValue::Scalar(s.into()))
        }),
        arb_number().prop_map(|n| {
            FilterNode::condition("age", OperatorKind::GreaterThan, ConditionValue::Scalar(n))
        }),
        (arb_number(), arb_number()).prop_map(|(a, b)| {
            FilterNode::condition("age", OperatorKind::Between, sorted_pair(a, b))
        }),
        any::<bool>().prop_map(|b| {
            FilterNode::condition("urgent", OperatorKind::Equals, ConditionValue::Scalar(b.into()))
        }),
        (arb_date(), arb_date()).prop_map(|(a, b)| {
            FilterNode::condition("created", OperatorKind::Between, sorted_pair(a, b))
        }),
        prop::collection::vec(
            prop_oneof![
                any::<i64>().prop_map(Scalar::Int),
                "[a-z0-9_]{1,8}".prop_map(Scalar::String),
            ],
            1..4
        )
        .prop_map(|refs| {
            FilterNode::condition("assignee", OperatorKind::In, ConditionValue::List(refs))
        }),
        any::<bool>().prop_map(|b| {
            FilterNode::condition("assignee", OperatorKind::IsNull, ConditionValue::Scalar(b.into()))
        }),
    ]
}

fn arb_tree() -> impl Strategy<Value = FilterNode> {
    arb_condition().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::and),
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::or),
            inner.prop_map(FilterNode::not),
        ]
    })
}

proptest! {
    #[test]
    fn serialized_trees_parse_back(tree in arb_tree()) {
        let schema = ticket_schema();
        let reparsed = parse(&serialize(&tree), &schema);
        prop_assert_eq!(reparsed, Ok(tree));
    }
}

#[test]
fn test_aliases_serialize_to_primary_names() {
    let schema = ticket_schema();
    let raw = json!({ "Or": [
        { "field": "priority", "op": "nin", "value": ["low"] },
        { "field": "created", "op": "range", "value": ["2024-01-01", "2024-06-30T12:00:00+02:00"] }
    ]});

    let tree = parse(&raw, &schema).unwrap();
    let canonical = serialize(&tree);
    assert_eq!(
        canonical,
        json!({ "or": [
            { "field": "priority", "op": "notin", "value": ["low"] },
            { "field": "created", "op": "between", "value": ["2024-01-01", "2024-06-30T10:00:00Z"] }
        ]})
    );
    assert_eq!(parse(&canonical, &schema).unwrap(), tree);
}
