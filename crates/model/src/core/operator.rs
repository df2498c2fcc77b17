use crate::core::value_type::ValueType;
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashMap, fmt};

/// Shape of the value an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// One scalar of the field's type.
    Single,
    /// A non-empty list of scalars of the field's type.
    List,
    /// Exactly two scalars of the field's type, `[low, high]`.
    Pair,
    /// A boolean switch, independent of the field's type.
    Flag,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Single => write!(f, "a single value"),
            Arity::List => write!(f, "a non-empty list of values"),
            Arity::Pair => write!(f, "a pair of values [low, high]"),
            Arity::Flag => write!(f, "a boolean"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    In,
    NotIn,
    GreaterThan,
    LessThan,
    Between,
    IsNull,
}

lazy_static! {
    static ref OPERATOR_NAMES: HashMap<&'static str, OperatorKind> = build_operator_name_map();
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 10] = [
        OperatorKind::Equals,
        OperatorKind::NotEquals,
        OperatorKind::Contains,
        OperatorKind::StartsWith,
        OperatorKind::In,
        OperatorKind::NotIn,
        OperatorKind::GreaterThan,
        OperatorKind::LessThan,
        OperatorKind::Between,
        OperatorKind::IsNull,
    ];

    /// Canonical wire name, emitted by serialization.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "eq",
            OperatorKind::NotEquals => "ne",
            OperatorKind::Contains => "contains",
            OperatorKind::StartsWith => "startswith",
            OperatorKind::In => "in",
            OperatorKind::NotIn => "notin",
            OperatorKind::GreaterThan => "gt",
            OperatorKind::LessThan => "lt",
            OperatorKind::Between => "between",
            OperatorKind::IsNull => "isnull",
        }
    }

    /// Resolves a wire name or one of its aliases.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        OPERATOR_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "is",
            OperatorKind::NotEquals => "is not",
            OperatorKind::Contains => "contains",
            OperatorKind::StartsWith => "starts with",
            OperatorKind::In => "is any of",
            OperatorKind::NotIn => "is none of",
            OperatorKind::GreaterThan => "greater than",
            OperatorKind::LessThan => "less than",
            OperatorKind::Between => "between",
            OperatorKind::IsNull => "is empty",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            OperatorKind::In | OperatorKind::NotIn => Arity::List,
            OperatorKind::Between => Arity::Pair,
            OperatorKind::IsNull => Arity::Flag,
            _ => Arity::Single,
        }
    }

    pub fn is_compatible_with(&self, value_type: ValueType) -> bool {
        match self {
            OperatorKind::Equals | OperatorKind::NotEquals | OperatorKind::IsNull => true,
            OperatorKind::Contains | OperatorKind::StartsWith => value_type.is_textual(),
            OperatorKind::In | OperatorKind::NotIn => value_type != ValueType::Boolean,
            OperatorKind::GreaterThan | OperatorKind::LessThan | OperatorKind::Between => {
                value_type.is_orderable()
            }
        }
    }

    /// Every operator legal for `value_type`, in declaration order.
    pub fn compatible_with(value_type: ValueType) -> Vec<OperatorKind> {
        OperatorKind::ALL
            .into_iter()
            .filter(|op| op.is_compatible_with(value_type))
            .collect()
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for OperatorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for OperatorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        OperatorKind::from_wire_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown operator '{name}'")))
    }
}

fn build_operator_name_map() -> HashMap<&'static str, OperatorKind> {
    use OperatorKind::*;

    let entries = [
        ("eq", Equals),
        ("exact", Equals),
        ("ne", NotEquals),
        ("neq", NotEquals),
        ("contains", Contains),
        ("startswith", StartsWith),
        ("starts_with", StartsWith),
        ("in", In),
        ("notin", NotIn),
        ("not_in", NotIn),
        ("nin", NotIn),
        ("gt", GreaterThan),
        ("lt", LessThan),
        ("between", Between),
        ("range", Between),
        ("isnull", IsNull),
        ("is_null", IsNull),
    ];

    let mut map = HashMap::new();
    for (name, op) in entries {
        map.insert(name, op);
    }
    map
}
