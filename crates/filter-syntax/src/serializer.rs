//! Canonical JSON form of a filter tree. The output is accepted by the
//! parser as-is and parses back to an equal tree.

use crate::ast::node::{ConditionNode, FilterNode, GroupNode};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue, json};

pub fn serialize(node: &FilterNode) -> JsonValue {
    match node {
        FilterNode::Condition(condition) => serialize_condition(condition),
        FilterNode::Group(group) => serialize_group(group),
    }
}

fn serialize_group(group: &GroupNode) -> JsonValue {
    let body = match group {
        GroupNode::Not(inner) => serialize(inner),
        GroupNode::And(children) | GroupNode::Or(children) => {
            JsonValue::Array(children.iter().map(serialize).collect())
        }
    };

    let mut object = Map::with_capacity(1);
    object.insert(group.operator().key().to_string(), body);
    JsonValue::Object(object)
}

fn serialize_condition(condition: &ConditionNode) -> JsonValue {
    json!({
        "field": condition.field,
        "op": condition.operator.wire_name(),
        "value": condition.value.to_json(),
    })
}

impl Serialize for FilterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(self).serialize(serializer)
    }
}
