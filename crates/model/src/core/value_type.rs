use serde::{Deserialize, Serialize};
use std::fmt;

/// The value type a filterable field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Reference,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::String,
        ValueType::Number,
        ValueType::Boolean,
        ValueType::Date,
        ValueType::Enum,
        ValueType::Reference,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Enum => "enum",
            ValueType::Reference => "reference",
        }
    }

    /// Whether values of this type have a total order usable by range operators.
    pub fn is_orderable(&self) -> bool {
        matches!(self, ValueType::Number | ValueType::Date)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl TryFrom<&str> for ValueType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ValueType::ALL
            .into_iter()
            .find(|ty| ty.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown value type: {s}"))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
