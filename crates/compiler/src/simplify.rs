//! Structural rewrites that keep the set of matched records unchanged.
//!
//! - nested groups of the same kind are flattened: `A AND (B AND C)` -> `A AND B AND C`;
//!   empty groups are left in place for the compiler to reject
//! - AND/OR groups with one child are replaced by that child
//! - double negation is removed: `NOT NOT A` -> `A`

use filter_syntax::{FilterNode, GroupNode};

pub fn simplify(node: &FilterNode) -> FilterNode {
    match node {
        FilterNode::Condition(_) => node.clone(),
        FilterNode::Group(GroupNode::Not(inner)) => match simplify(inner) {
            FilterNode::Group(GroupNode::Not(double)) => *double,
            other => FilterNode::not(other),
        },
        FilterNode::Group(GroupNode::And(children)) => {
            let mut flat = Vec::with_capacity(children.len());
            for child in children {
                match simplify(child) {
                    FilterNode::Group(GroupNode::And(nested)) if !nested.is_empty() => {
                        flat.extend(nested)
                    }
                    other => flat.push(other),
                }
            }
            collapse(flat, FilterNode::and)
        }
        FilterNode::Group(GroupNode::Or(children)) => {
            let mut flat = Vec::with_capacity(children.len());
            for child in children {
                match simplify(child) {
                    FilterNode::Group(GroupNode::Or(nested)) if !nested.is_empty() => {
                        flat.extend(nested)
                    }
                    other => flat.push(other),
                }
            }
            collapse(flat, FilterNode::or)
        }
    }
}

fn collapse(mut children: Vec<FilterNode>, group: fn(Vec<FilterNode>) -> FilterNode) -> FilterNode {
    if children.len() == 1
        && let Some(only) = children.pop()
    {
        return only;
    }
    group(children)
}
