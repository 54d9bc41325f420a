//! Typed table cells.

use crate::column::ColumnDef;
use aid_api::columnar::ColumnarResponse;
use aid_api::tables_info::ColumnKind;
use aid_utils::dates::{format_date_time, from_unix, parse_time_input};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Time(DateTime<Utc>),
    Real(f64),
    Integer(i64),
    Text(String),
}

pub type Row = Vec<Value>;

impl Value {
    /// Read a JSON cell as a column of kind `kind`. Anything that does not fit
    /// the kind is null.
    pub fn from_json(kind: ColumnKind, json: &serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match (kind, json) {
            (_, Json::Null) => Value::Null,
            (ColumnKind::Time, Json::Number(n)) => {
                n.as_f64().and_then(from_unix).map_or(Value::Null, Value::Time)
            }
            (ColumnKind::Time, Json::String(s)) => {
                parse_time_input(s).map_or(Value::Null, Value::Time)
            }
            (ColumnKind::Real, Json::Number(n)) => {
                n.as_f64().filter(|v| v.is_finite()).map_or(Value::Null, Value::Real)
            }
            (ColumnKind::Real, Json::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map_or(Value::Null, Value::Real),
            (ColumnKind::Integer, Json::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.round() as i64))
                .map_or(Value::Null, Value::Integer),
            (ColumnKind::Integer, Json::String(s)) => {
                s.trim().parse().map_or(Value::Null, Value::Integer)
            }
            (ColumnKind::Enum | ColumnKind::Text, Json::String(s)) => Value::Text(s.clone()),
            (ColumnKind::Enum | ColumnKind::Text, Json::Number(n)) => Value::Text(n.to_string()),
            (ColumnKind::Enum | ColumnKind::Text, Json::Bool(b)) => Value::Text(b.to_string()),
            _ => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Ordering between comparable cells. Numbers compare across real and
    /// integer; everything else only within its own kind.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }

    /// Equality as the filters see it.
    pub fn same(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Time(t) => f.write_str(&format_date_time(t)),
            Value::Real(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Typed rows in column order. Fields missing from the response are null.
pub fn rows_from_columnar(resp: &ColumnarResponse, columns: &[ColumnDef]) -> Vec<Row> {
    let indices: Vec<Option<usize>> = columns.iter().map(|c| resp.column_index(&c.id)).collect();
    resp.data
        .iter()
        .map(|raw| {
            columns
                .iter()
                .zip(&indices)
                .map(|(col, idx)| {
                    idx.and_then(|i| raw.get(i))
                        .map_or(Value::Null, |json| Value::from_json(col.kind, json))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::columns_from_info;
    use crate::fixtures::sample_info;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_json_by_kind() {
        let t = Utc.with_ymd_and_hms(2021, 12, 6, 0, 0, 0).unwrap();
        assert_eq!(Value::from_json(ColumnKind::Time, &json!(1_638_748_800)), Value::Time(t));
        assert_eq!(Value::from_json(ColumnKind::Time, &json!("2021-12-06T00:00:00Z")), Value::Time(t));
        assert_eq!(Value::from_json(ColumnKind::Real, &json!("2.5")), Value::Real(2.5));
        assert_eq!(Value::from_json(ColumnKind::Integer, &json!(3)), Value::Integer(3));
        assert_eq!(Value::from_json(ColumnKind::Enum, &json!("SSC")), Value::Text("SSC".into()));
        assert_eq!(Value::from_json(ColumnKind::Real, &json!("abc")), Value::Null);
        assert_eq!(Value::from_json(ColumnKind::Text, &json!(null)), Value::Null);
    }

    #[test]
    fn test_display() {
        let t = Utc.with_ymd_and_hms(2021, 12, 6, 13, 5, 9).unwrap();
        assert_eq!(Value::Time(t).to_string(), "2021-12-06 13:05:09");
        assert_eq!(Value::Real(5.0).to_string(), "5");
        assert_eq!(Value::Real(-1.25).to_string(), "-1.25");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_compare_across_numbers() {
        assert_eq!(Value::Integer(3).compare(&Value::Real(2.5)), Some(Ordering::Greater));
        assert!(Value::Real(2.0).same(&Value::Integer(2)));
        assert_eq!(Value::Text("a".into()).compare(&Value::Real(1.0)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_rows_follow_column_order() {
        let columns = columns_from_info(&sample_info());
        let resp: ColumnarResponse = serde_json::from_value(json!({
            "fields": ["magnitude", "time", "onset_type", "solar_flares_class"],
            "data": [[1.5, 1_638_748_800, "SSC", "X1"], [null, 1_638_835_200, "SI", null]]
        }))
        .unwrap();
        let rows = rows_from_columnar(&resp, &columns);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0][0], Value::Time(_)));
        assert_eq!(rows[0][1], Value::Real(1.5));
        assert_eq!(rows[0][2], Value::Text("SSC".into()));
        // Not in the response
        assert_eq!(rows[0][3], Value::Null);
        assert_eq!(rows[0][5], Value::Text("X1".into()));
        assert_eq!(rows[1][1], Value::Null);
    }
}
