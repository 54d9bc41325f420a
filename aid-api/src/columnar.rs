//! Row-major `{ data, fields }` bodies served by the OMNI and events endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnarResponse {
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl ColumnarResponse {
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Transpose the requested fields into columns, in the requested order.
    ///
    /// Returns `None` when there are no rows. A field the server did not send
    /// becomes a column of nulls so series indices stay stable.
    pub fn select(&self, fields: &[&str]) -> Option<Vec<Vec<Value>>> {
        if self.data.is_empty() {
            return None;
        }
        let columns = fields
            .iter()
            .map(|field| {
                let idx = self.column_index(field);
                self.data
                    .iter()
                    .map(|row| idx.and_then(|i| row.get(i)).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Some(columns)
    }
}
