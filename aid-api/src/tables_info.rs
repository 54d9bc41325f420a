//! Column catalogue for the events table.
//!
//! The server renders its table configuration into
//! `{ table: { column_id: { name, type, enum?, description? } } }`.
//! Ordering matters: row cells follow the catalogue order across all tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared type of a table column. Drives filter coercion and cell display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Time,
    #[default]
    Real,
    Integer,
    Enum,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ColumnKind,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept in rows but not offered in column pickers.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// Ordered `table -> column id -> column info` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TablesInfo(pub IndexMap<String, IndexMap<String, ColumnInfo>>);

impl TablesInfo {
    /// `(table, column id, info)` in catalogue order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str, &ColumnInfo)> {
        self.0.iter().flat_map(|(table, cols)| {
            cols.iter()
                .map(move |(id, info)| (table.as_str(), id.as_str(), info))
        })
    }

    pub fn len(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
