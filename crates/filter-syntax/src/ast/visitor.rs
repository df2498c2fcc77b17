use crate::ast::node::{ConditionNode, FilterNode, GroupNode};

/// Visitor trait for filter tree traversal
pub trait FilterVisitor {
    fn visit_node(&mut self, node: &FilterNode) {
        match node {
            FilterNode::Group(group) => self.visit_group(group),
            FilterNode::Condition(condition) => self.visit_condition(condition),
        }
    }

    fn visit_group(&mut self, group: &GroupNode) {
        walk_group(self, group);
    }

    fn visit_condition(&mut self, _condition: &ConditionNode) {}
}

pub fn walk_group<V: FilterVisitor + ?Sized>(visitor: &mut V, group: &GroupNode) {
    for child in group.children() {
        visitor.visit_node(child);
    }
}
