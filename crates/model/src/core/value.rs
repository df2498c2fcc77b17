use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use std::{cmp::Ordering, fmt};

/// A single typed value carried by a filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl Scalar {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
            Scalar::Date(_) => "date",
            Scalar::DateTime(_) => "datetime",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Reads `YYYY-MM-DD` as a date, otherwise an RFC 3339 timestamp
    /// normalised to UTC.
    pub fn parse_temporal(raw: &str) -> Option<Scalar> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Scalar::Date(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| Scalar::DateTime(dt.with_timezone(&Utc)))
    }

    /// Orders two scalars of compatible kinds. Dates compare against
    /// date-times at midnight UTC.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Date(a), DateTime(b)) => Some(midnight_utc(a).cmp(b)),
            (DateTime(a), Date(b)) => Some(a.cmp(&midnight_utc(b))),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Scalar::String(v) => JsonValue::String(v.clone()),
            Scalar::Int(v) => JsonValue::from(*v),
            Scalar::Float(v) => JsonValue::from(*v),
            Scalar::Boolean(v) => JsonValue::Bool(*v),
            Scalar::Date(v) => JsonValue::String(v.format("%Y-%m-%d").to_string()),
            Scalar::DateTime(v) => {
                JsonValue::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

fn midnight_utc(date: &NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(v) => write!(f, "\"{v}\""),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Scalar::DateTime(v) => write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(v: NaiveDate) -> Self {
        Scalar::Date(v)
    }
}

/// The value of a condition, shaped by its operator's arity.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Pair(Scalar, Scalar),
}

impl ConditionValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConditionValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            ConditionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            ConditionValue::Pair(low, high) => Some((low, high)),
            _ => None,
        }
    }

    pub fn scalars(&self) -> Vec<&Scalar> {
        match self {
            ConditionValue::Scalar(v) => vec![v],
            ConditionValue::List(items) => items.iter().collect(),
            ConditionValue::Pair(low, high) => vec![low, high],
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ConditionValue::Scalar(v) => v.to_json(),
            ConditionValue::List(items) => {
                JsonValue::Array(items.iter().map(Scalar::to_json).collect())
            }
            ConditionValue::Pair(low, high) => JsonValue::Array(vec![low.to_json(), high.to_json()]),
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Scalar(v) => write!(f, "{v}"),
            ConditionValue::List(items) => {
                let rendered = items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{rendered}]")
            }
            ConditionValue::Pair(low, high) => write!(f, "[{low}, {high}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(
            Scalar::Int(3).compare(&Scalar::Float(2.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Scalar::Int(3).compare(&Scalar::from("3")), None);
    }

    #[test]
    fn test_compare_date_with_datetime() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let later = DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            Scalar::Date(date).compare(&Scalar::DateTime(later)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_parse_temporal() {
        assert_eq!(
            Scalar::parse_temporal("2024-03-01"),
            Some(Scalar::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
        );
        let Some(Scalar::DateTime(dt)) = Scalar::parse_temporal("2024-03-01T12:30:00+01:00") else {
            panic!("expected a timestamp");
        };
        assert_eq!(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true), "2024-03-01T11:30:00Z");
        assert_eq!(Scalar::parse_temporal("yesterday"), None);
    }

    #[test]
    fn test_to_json() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
        assert_eq!(Scalar::Date(date).to_json(), json!("2023-01-09"));
        assert_eq!(
            ConditionValue::Pair(Scalar::Int(1), Scalar::Float(2.5)).to_json(),
            json!([1, 2.5])
        );
    }

    #[test]
    fn test_display() {
        let value = ConditionValue::List(vec!["high".into(), "critical".into()]);
        assert_eq!(value.to_string(), "[\"high\", \"critical\"]");
    }
}
