use crate::ast::visitor::{FilterVisitor, walk_group};
use model::{ConditionValue, OperatorKind};
use std::{collections::BTreeSet, fmt};

/// Boolean combinator of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupOperator {
    And,
    Or,
    Not,
}

impl GroupOperator {
    pub fn key(&self) -> &'static str {
        match self {
            GroupOperator::And => "and",
            GroupOperator::Or => "or",
            GroupOperator::Not => "not",
        }
    }

    /// Group keys are matched case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "and" => Some(GroupOperator::And),
            "or" => Some(GroupOperator::Or),
            "not" => Some(GroupOperator::Not),
            _ => None,
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_ascii_uppercase())
    }
}

/// A node of the abstract filter tree.
///
/// Trees own their children outright; `clone` is a deep copy. The parser
/// is the normal way to obtain one. Code building trees by hand must keep
/// AND/OR groups non-empty and only use fields and operators the target
/// schema allows.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Group(GroupNode),
    Condition(ConditionNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupNode {
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    Not(Box<FilterNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    pub field: String,
    pub operator: OperatorKind,
    pub value: ConditionValue,
}

impl ConditionNode {
    pub fn new(field: impl Into<String>, operator: OperatorKind, value: ConditionValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

impl GroupNode {
    pub fn operator(&self) -> GroupOperator {
        match self {
            GroupNode::And(_) => GroupOperator::And,
            GroupNode::Or(_) => GroupOperator::Or,
            GroupNode::Not(_) => GroupOperator::Not,
        }
    }

    pub fn children(&self) -> &[FilterNode] {
        match self {
            GroupNode::And(children) | GroupNode::Or(children) => children,
            GroupNode::Not(inner) => std::slice::from_ref(inner.as_ref()),
        }
    }
}

impl FilterNode {
    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::Group(GroupNode::And(children))
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Group(GroupNode::Or(children))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: FilterNode) -> Self {
        FilterNode::Group(GroupNode::Not(Box::new(inner)))
    }

    pub fn condition(
        field: impl Into<String>,
        operator: OperatorKind,
        value: ConditionValue,
    ) -> Self {
        FilterNode::Condition(ConditionNode::new(field, operator, value))
    }

    pub fn as_condition(&self) -> Option<&ConditionNode> {
        match self {
            FilterNode::Condition(c) => Some(c),
            FilterNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            FilterNode::Group(g) => Some(g),
            FilterNode::Condition(_) => None,
        }
    }

    /// Total number of nodes, groups and conditions alike.
    pub fn node_count(&self) -> usize {
        let mut stats = TreeStats::default();
        stats.visit_node(self);
        stats.nodes
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            FilterNode::Condition(_) => 1,
            FilterNode::Group(g) => {
                1 + g
                    .children()
                    .iter()
                    .map(FilterNode::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Distinct field names referenced by the tree.
    pub fn fields(&self) -> BTreeSet<&str> {
        let mut collector = FieldCollector::default();
        collector.collect(self);
        collector.fields
    }
}

#[derive(Default)]
struct TreeStats {
    nodes: usize,
}

impl FilterVisitor for TreeStats {
    fn visit_group(&mut self, group: &GroupNode) {
        self.nodes += 1;
        walk_group(self, group);
    }

    fn visit_condition(&mut self, _condition: &ConditionNode) {
        self.nodes += 1;
    }
}

#[derive(Default)]
struct FieldCollector<'a> {
    fields: BTreeSet<&'a str>,
}

impl<'a> FieldCollector<'a> {
    fn collect(&mut self, node: &'a FilterNode) {
        match node {
            FilterNode::Condition(c) => {
                self.fields.insert(c.field.as_str());
            }
            FilterNode::Group(g) => {
                for child in g.children() {
                    self.collect(child);
                }
            }
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::Condition(c) => write!(f, "{c}"),
            FilterNode::Group(g) => write!(f, "{g}"),
        }
    }
}

impl fmt::Display for GroupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupNode::Not(inner) => write!(f, "NOT {inner}"),
            GroupNode::And(children) | GroupNode::Or(children) => {
                let joiner = format!(" {} ", self.operator());
                let rendered = children
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(&joiner);
                write!(f, "({rendered})")
            }
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}
