pub mod ast {
    pub mod node;
    pub mod path;
    pub mod visitor;
}
pub mod errors;
pub mod parser;
pub mod serializer;

pub use ast::{
    node::{ConditionNode, FilterNode, GroupNode, GroupOperator},
    path::{Path, PathSegment},
    visitor::FilterVisitor,
};
pub use errors::{ValidationCode, ValidationError, ValidationErrors};
pub use parser::{ParseOptions, Parser, parse};
pub use serializer::serialize;
