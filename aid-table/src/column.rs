//! Table columns as the UI sees them.

use aid_api::tables_info::{ColumnKind, TablesInfo};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    /// Field name in event rows.
    pub id: String,
    /// Source table.
    pub table: String,
    /// Display name.
    pub name: String,
    pub kind: ColumnKind,
    pub variants: Vec<String>,
    pub description: Option<String>,
    pub hidden: bool,
}

impl ColumnDef {
    pub fn is_variant(&self, value: &str) -> bool {
        self.variants.iter().any(|v| v == value)
    }
}

/// Columns of every table, in catalogue order.
pub fn columns_from_info(info: &TablesInfo) -> Vec<ColumnDef> {
    info.columns()
        .map(|(table, id, col)| ColumnDef {
            id: id.to_string(),
            table: table.to_string(),
            name: col.name.clone(),
            kind: col.kind,
            variants: col.variants.clone().unwrap_or_default(),
            description: col.description.clone(),
            hidden: col.hidden,
        })
        .collect()
}

pub fn find_column<'a>(columns: &'a [ColumnDef], id: &str) -> Option<(usize, &'a ColumnDef)> {
    columns.iter().enumerate().find(|(_, c)| c.id == id)
}

/// `forbush_effects` -> `Forbush Effects`
pub fn pretty_name(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Label for a column in pickers. Names shared by several tables get the
/// table's pretty name in front.
pub fn pretty_column(columns: &[ColumnDef], column: &ColumnDef) -> String {
    let shared = columns
        .iter()
        .filter(|c| c.name == column.name && c.table != column.table)
        .count();
    if shared == 0 {
        column.name.clone()
    } else {
        format!("{} {}", pretty_name(&column.table), column.name)
    }
}

/// First header row: consecutive columns grouped by table, `(pretty table, span)`.
pub fn header_groups(columns: &[ColumnDef]) -> Vec<(String, usize)> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for col in columns {
        match groups.last_mut() {
            Some((table, span)) if *table == col.table => *span += 1,
            _ => groups.push((col.table.as_str(), 1)),
        }
    }
    groups
        .into_iter()
        .map(|(table, span)| (pretty_name(table), span))
        .collect()
}
