//! Parser/validator: raw JSON filter documents in, abstract filter trees out.
//!
//! One pass both checks the document and builds the tree. Problems are
//! collected rather than returned on first sight, so a caller sees every
//! defect of a request at once.

use crate::{
    ast::{
        node::{ConditionNode, FilterNode, GroupOperator},
        path::Path,
    },
    errors::{ValidationCode, ValidationError, ValidationErrors},
};
use coercion::{coerce_value, describe_json};
use model::{ModelSchema, OperatorKind};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

pub(crate) mod coercion;

const CONDITION_KEYS: [&str; 3] = ["field", "op", "value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting, counting the root as 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Validates `raw` against `schema` with default options.
pub fn parse(raw: &JsonValue, schema: &ModelSchema) -> Result<FilterNode, ValidationErrors> {
    Parser::new(schema).parse(raw)
}

pub struct Parser<'a> {
    schema: &'a ModelSchema,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(schema: &'a ModelSchema) -> Self {
        Self::with_options(schema, ParseOptions::default())
    }

    pub fn with_options(schema: &'a ModelSchema, options: ParseOptions) -> Self {
        Self { schema, options }
    }

    pub fn parse(&self, raw: &JsonValue) -> Result<FilterNode, ValidationErrors> {
        let mut errors = Vec::new();
        let tree = self.parse_node(raw, &Path::root(), 1, &mut errors);

        debug!(
            model = self.schema.name(),
            nodes = tree.as_ref().map_or(0, FilterNode::node_count),
            errors = errors.len(),
            "Validated filter document"
        );

        match (tree, ValidationErrors::from_vec(errors)) {
            (_, Some(errors)) => Err(errors),
            (Some(tree), None) => Ok(tree),
            (None, None) => Err(ValidationErrors::single(ValidationError::new(
                Path::root(),
                ValidationCode::MalformedStructure,
                "filter document could not be read",
            ))),
        }
    }

    fn parse_node(
        &self,
        raw: &JsonValue,
        path: &Path,
        depth: usize,
        errors: &mut Vec<ValidationError>,
    ) -> Option<FilterNode> {
        if depth > self.options.max_depth {
            errors.push(ValidationError::new(
                path.clone(),
                ValidationCode::MalformedStructure,
                format!("nesting exceeds the maximum depth of {}", self.options.max_depth),
            ));
            return None;
        }

        let Some(object) = raw.as_object() else {
            errors.push(ValidationError::new(
                path.clone(),
                ValidationCode::MalformedStructure,
                format!("expected a group or condition object, got {}", describe_json(raw)),
            ));
            return None;
        };

        let group_key = object
            .keys()
            .find_map(|key| GroupOperator::from_key(key).map(|op| (key, op)));

        match group_key {
            Some((key, op)) => self.parse_group(object, key, op, path, depth, errors),
            None => self.parse_condition(object, path, errors),
        }
    }

    fn parse_group(
        &self,
        object: &Map<String, JsonValue>,
        key: &str,
        op: GroupOperator,
        path: &Path,
        depth: usize,
        errors: &mut Vec<ValidationError>,
    ) -> Option<FilterNode> {
        if object.len() != 1 {
            errors.push(ValidationError::new(
                path.clone(),
                ValidationCode::MalformedStructure,
                format!(
                    "a '{}' group must be the only key of its object, found {}",
                    op.key(),
                    quoted_keys(object)
                ),
            ));
            return None;
        }

        let raw_children = &object[key];
        let group_path = path.key(op.key());

        match op {
            GroupOperator::And | GroupOperator::Or => {
                let Some(items) = raw_children.as_array() else {
                    errors.push(ValidationError::new(
                        path.clone(),
                        ValidationCode::MalformedStructure,
                        format!(
                            "'{}' expects an array of nodes, got {}",
                            op.key(),
                            describe_json(raw_children)
                        ),
                    ));
                    return None;
                };

                if items.is_empty() {
                    errors.push(ValidationError::new(
                        path.clone(),
                        ValidationCode::EmptyGroup,
                        format!("'{}' group has no children", op.key()),
                    ));
                    return None;
                }

                let children = self.parse_children(items, &group_path, depth, errors)?;
                Some(match op {
                    GroupOperator::And => FilterNode::and(children),
                    _ => FilterNode::or(children),
                })
            }
            GroupOperator::Not => match raw_children {
                JsonValue::Array(items) => {
                    let children = self.parse_children(items, &group_path, depth, errors);
                    if items.len() != 1 {
                        errors.push(ValidationError::new(
                            path.clone(),
                            ValidationCode::ArityMismatch,
                            format!("'not' takes exactly one node, got {}", items.len()),
                        ));
                        return None;
                    }
                    children?.pop().map(FilterNode::not)
                }
                single => self
                    .parse_node(single, &group_path, depth + 1, errors)
                    .map(FilterNode::not),
            },
        }
    }

    /// Parses every child, even after a failing sibling. `None` if any failed.
    fn parse_children(
        &self,
        items: &[JsonValue],
        group_path: &Path,
        depth: usize,
        errors: &mut Vec<ValidationError>,
    ) -> Option<Vec<FilterNode>> {
        let parsed: Vec<Option<FilterNode>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.parse_node(item, &group_path.index(i), depth + 1, errors))
            .collect();
        parsed.into_iter().collect()
    }

    fn parse_condition(
        &self,
        object: &Map<String, JsonValue>,
        path: &Path,
        errors: &mut Vec<ValidationError>,
    ) -> Option<FilterNode> {
        match self.check_condition(object) {
            Ok(condition) => Some(FilterNode::Condition(condition)),
            Err((code, message)) => {
                errors.push(ValidationError::new(path.clone(), code, message));
                None
            }
        }
    }

    fn check_condition(
        &self,
        object: &Map<String, JsonValue>,
    ) -> Result<ConditionNode, (ValidationCode, String)> {
        let malformed = |message: String| (ValidationCode::MalformedStructure, message);

        let missing: Vec<&str> = CONDITION_KEYS
            .iter()
            .copied()
            .filter(|k| !object.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(malformed(format!(
                "condition is missing {}",
                missing
                    .iter()
                    .map(|k| format!("'{k}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        if let Some(extra) = object.keys().find(|k| !CONDITION_KEYS.contains(&k.as_str())) {
            return Err(malformed(format!("unexpected key '{extra}' in condition")));
        }

        let field_name = object["field"]
            .as_str()
            .ok_or_else(|| malformed("'field' must be a string".to_string()))?;
        let op_name = object["op"]
            .as_str()
            .ok_or_else(|| malformed("'op' must be a string".to_string()))?;

        let field = self.schema.field(field_name).ok_or_else(|| {
            (
                ValidationCode::UnknownField,
                format!(
                    "unknown field '{field_name}' for model '{}'",
                    self.schema.name()
                ),
            )
        })?;

        let operator = OperatorKind::from_wire_name(op_name)
            .filter(|op| field.allows(*op))
            .ok_or_else(|| {
                (
                    ValidationCode::OperatorNotAllowed,
                    format!(
                        "operator '{op_name}' is not allowed for field '{field_name}' (allowed: {})",
                        field
                            .operators()
                            .iter()
                            .map(|op| op.wire_name())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?;

        let value = coerce_value(field, operator, &object["value"])
            .map_err(|(code, message)| (code, format!("field '{field_name}': {message}")))?;

        Ok(ConditionNode::new(field_name, operator, value))
    }
}

fn quoted_keys(object: &Map<String, JsonValue>) -> String {
    object
        .keys()
        .map(|k| format!("'{k}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
