//! Table filters.
//!
//! A filter is a column, an operation and the raw text the user typed. The
//! text is compiled into a typed [`Predicate`] according to the column kind
//! whenever any of the three changes. Filters that fail to compile are kept
//! (the card shows them as invalid) but take no part in filtering.

use crate::column::{find_column, ColumnDef};
use crate::value::{Row, Value};
use aid_api::tables_info::ColumnKind;
use aid_utils::dates::{format_date, parse_time_input};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Column a cursor-less "add filter" starts on.
pub const DEFAULT_FILTER_COLUMN: &str = "magnitude";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "<>")]
    Ne,
    #[serde(rename = "is null")]
    IsNull,
    #[serde(rename = "not null")]
    NotNull,
    #[serde(rename = "includes")]
    Includes,
    #[serde(rename = "in list")]
    InList,
}

impl FilterOp {
    pub const ALL: [FilterOp; 8] = [
        FilterOp::Gte,
        FilterOp::Lte,
        FilterOp::Eq,
        FilterOp::Ne,
        FilterOp::IsNull,
        FilterOp::NotNull,
        FilterOp::Includes,
        FilterOp::InList,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::Eq => "==",
            FilterOp::Ne => "<>",
            FilterOp::IsNull => "is null",
            FilterOp::NotNull => "not null",
            FilterOp::Includes => "includes",
            FilterOp::InList => "in list",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.label() == label)
    }

    /// Null checks take no input at all.
    pub fn takes_input(&self) -> bool {
        !matches!(self, FilterOp::IsNull | FilterOp::NotNull)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Empty filter value")]
    Empty,
    #[error("Not a date: {0:?}")]
    InvalidTime(String),
    #[error("Not a number: {0:?}")]
    InvalidNumber(String),
    #[error("Not an integer: {0:?}")]
    InvalidInteger(String),
    #[error("Not one of the listed values: {0:?}")]
    NotAVariant(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    IsNull,
    NotNull,
    Includes(String),
    Compare(FilterOp, Value),
    InList(Vec<Value>),
}

impl Predicate {
    pub fn matches(&self, cell: &Value) -> bool {
        match self {
            Predicate::IsNull => cell.is_null(),
            Predicate::NotNull => !cell.is_null(),
            Predicate::Includes(needle) => !cell.is_null() && cell.to_string().contains(needle.as_str()),
            Predicate::Compare(op, value) => {
                let ord = cell.compare(value);
                match op {
                    FilterOp::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
                    FilterOp::Lte => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                    FilterOp::Eq => ord == Some(Ordering::Equal),
                    FilterOp::Ne => ord != Some(Ordering::Equal),
                    _ => false,
                }
            }
            Predicate::InList(values) => values.iter().any(|v| cell.same(v)),
        }
    }
}

/// Enum columns compared with a relational operator pick from a list rather
/// than take free text.
pub fn is_select_input(column: &ColumnDef, op: FilterOp) -> bool {
    column.kind == ColumnKind::Enum && !matches!(op, FilterOp::Includes | FilterOp::InList)
}

/// The input actually in effect: a select input that is not a listed variant
/// falls back to the first variant.
pub fn effective_input<'a>(column: &'a ColumnDef, op: FilterOp, raw: &'a str) -> &'a str {
    if is_select_input(column, op) && !column.is_variant(raw) {
        if let Some(first) = column.variants.first() {
            return first;
        }
    }
    raw
}

/// Split multi-value input. Time values may contain spaces.
pub fn split_tokens(kind: ColumnKind, input: &str) -> Vec<&str> {
    let is_delimiter = |c: char| match kind {
        ColumnKind::Time => matches!(c, ',' | '|' | '/'),
        _ => c.is_whitespace() || matches!(c, ',' | '|' | '/'),
    };
    input
        .trim()
        .split(is_delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Coerce one token to the column's kind.
pub fn coerce(column: &ColumnDef, token: &str) -> Result<Value, FilterError> {
    match column.kind {
        ColumnKind::Time => parse_time_input(token)
            .map(Value::Time)
            .map_err(|_| FilterError::InvalidTime(token.to_string())),
        ColumnKind::Real => token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Real)
            .ok_or_else(|| FilterError::InvalidNumber(token.to_string())),
        ColumnKind::Integer => token
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| FilterError::InvalidInteger(token.to_string())),
        ColumnKind::Enum if column.is_variant(token) => Ok(Value::Text(token.to_string())),
        ColumnKind::Enum => Err(FilterError::NotAVariant(token.to_string())),
        ColumnKind::Text => Ok(Value::Text(token.to_string())),
    }
}

/// Compile `raw` for `op` on `column`.
pub fn compile(column: &ColumnDef, op: FilterOp, raw: &str) -> Result<Predicate, FilterError> {
    let input = effective_input(column, op, raw);
    match op {
        FilterOp::IsNull => return Ok(Predicate::IsNull),
        FilterOp::NotNull => return Ok(Predicate::NotNull),
        FilterOp::Includes => return Ok(Predicate::Includes(input.to_string())),
        _ => {}
    }
    let values = split_tokens(column.kind, input)
        .into_iter()
        .map(|t| coerce(column, t))
        .collect::<Result<Vec<Value>, FilterError>>()?;
    if op == FilterOp::InList {
        if values.is_empty() {
            return Err(FilterError::Empty);
        }
        return Ok(Predicate::InList(values));
    }
    let first = values.into_iter().next().ok_or(FilterError::Empty)?;
    Ok(Predicate::Compare(op, first))
}

/// A compiled predicate bound to its column's position in the row.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    pub column_index: usize,
    pub predicate: Predicate,
}

impl CompiledFilter {
    pub fn matches(&self, row: &Row) -> bool {
        self.predicate
            .matches(row.get(self.column_index).unwrap_or(&Value::Null))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: u64,
    column: String,
    operation: FilterOp,
    value: String,
    compiled: Result<CompiledFilter, FilterError>,
}

impl Filter {
    pub fn new(id: u64, column: &str, operation: FilterOp, value: &str, columns: &[ColumnDef]) -> Self {
        let mut filter = Self {
            id,
            column: column.to_string(),
            operation,
            value: value.to_string(),
            compiled: Err(FilterError::Empty),
        };
        filter.recompile(columns);
        filter
    }

    fn recompile(&mut self, columns: &[ColumnDef]) {
        self.compiled = match find_column(columns, &self.column) {
            None => Err(FilterError::UnknownColumn(self.column.clone())),
            Some((column_index, column)) => compile(column, self.operation, &self.value)
                .map(|predicate| CompiledFilter {
                    column_index,
                    predicate,
                }),
        };
        match &self.compiled {
            Ok(_) => debug!(
                "[AID] filter {}: {} {} {:?}",
                self.id, self.column, self.operation, self.value
            ),
            Err(e) => warn!("[AID] filter {} invalid: {}", self.id, e),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operation(&self) -> FilterOp {
        self.operation
    }

    /// The raw input as typed.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_column(&mut self, column: &str, columns: &[ColumnDef]) {
        self.column = column.to_string();
        self.recompile(columns);
    }

    pub fn set_operation(&mut self, operation: FilterOp, columns: &[ColumnDef]) {
        self.operation = operation;
        self.recompile(columns);
    }

    pub fn set_value(&mut self, value: &str, columns: &[ColumnDef]) {
        self.value = value.to_string();
        self.recompile(columns);
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    pub fn error(&self) -> Option<&FilterError> {
        self.compiled.as_ref().err()
    }

    pub fn compiled(&self) -> Option<&CompiledFilter> {
        self.compiled.as_ref().ok()
    }
}

/// Column, operation and input for a new filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    pub column: String,
    pub operation: FilterOp,
    pub value: String,
}

/// Draft a filter from the cell under the table cursor, or the default
/// `magnitude >= ""` without one.
pub fn draft_from_cursor(cursor: Option<(&ColumnDef, &Value)>) -> FilterDraft {
    let Some((column, cell)) = cursor else {
        return FilterDraft {
            column: DEFAULT_FILTER_COLUMN.to_string(),
            operation: FilterOp::Gte,
            value: String::new(),
        };
    };
    let operation = match (cell, column.kind) {
        (Value::Null, _) => FilterOp::IsNull,
        (_, ColumnKind::Enum) => FilterOp::Eq,
        (_, ColumnKind::Text) => FilterOp::Includes,
        _ => FilterOp::Gte,
    };
    let value = match cell {
        Value::Time(t) => format_date(t),
        other => other.to_string(),
    };
    FilterDraft {
        column: column.id.clone(),
        operation,
        value,
    }
}

/// The filters of one table session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
    next_id: u64,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, draft: FilterDraft, columns: &[ColumnDef]) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.filters
            .push(Filter::new(id, &draft.column, draft.operation, &draft.value, columns));
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<Filter> {
        let pos = self.filters.iter().position(|f| f.id == id)?;
        Some(self.filters.remove(pos))
    }

    pub fn remove_last(&mut self) -> Option<Filter> {
        self.filters.pop()
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Filter> {
        self.filters.iter_mut().find(|f| f.id == id)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Valid filters only.
    pub fn active(&self) -> impl Iterator<Item = &CompiledFilter> {
        self.filters.iter().filter_map(Filter::compiled)
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.active().all(|f| f.matches(row))
    }

    /// Inclusion mask over `rows`.
    pub fn mask(&self, rows: &[Row]) -> Vec<bool> {
        rows.iter().map(|r| self.matches(r)).collect()
    }

    /// Rows passing every valid filter, in their original order.
    pub fn apply<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::columns_from_info;
    use crate::fixtures::sample_info;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn real_column() -> ColumnDef {
        ColumnDef {
            id: "magnitude".into(),
            table: "forbush_effects".into(),
            name: "magnitude".into(),
            kind: ColumnKind::Real,
            variants: Vec::new(),
            description: None,
            hidden: false,
        }
    }

    fn column_of(kind: ColumnKind) -> ColumnDef {
        ColumnDef {
            kind,
            variants: vec!["SSC".into(), "iSW".into(), "SI".into()],
            ..real_column()
        }
    }

    fn numbers(values: &[f64]) -> Vec<Row> {
        values.iter().map(|v| vec![Value::Real(*v)]).collect()
    }

    #[test]
    fn test_op_labels_round_trip() {
        for op in FilterOp::ALL {
            assert_eq!(FilterOp::from_label(op.label()), Some(op));
        }
        assert_eq!(FilterOp::from_label("like"), None);
        assert_eq!(serde_json::to_string(&FilterOp::InList).unwrap(), "\"in list\"");
    }

    #[test]
    fn test_gte_numeric() {
        let columns = vec![real_column()];
        let mut set = FilterSet::new();
        set.add(
            FilterDraft {
                column: "magnitude".into(),
                operation: FilterOp::Gte,
                value: "5".into(),
            },
            &columns,
        );
        assert_eq!(set.mask(&numbers(&[3.0, 5.0, 7.0])), vec![false, true, true]);
    }

    #[test]
    fn test_in_list_is_numeric() {
        let p = compile(&real_column(), FilterOp::InList, "1,2,3").unwrap();
        let hits: Vec<bool> = [1.0, 2.0, 3.0, 12.0, 23.0, 1.5]
            .iter()
            .map(|v| p.matches(&Value::Real(*v)))
            .collect();
        assert_eq!(hits, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn test_comparisons_use_first_token() {
        let p = compile(&real_column(), FilterOp::Lte, "4 | 100").unwrap();
        assert_eq!(p, Predicate::Compare(FilterOp::Lte, Value::Real(4.0)));
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(split_tokens(ColumnKind::Real, " 1, 2|3 /4  5"), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            split_tokens(ColumnKind::Time, "2021-12-06 13:30, 2021-12-07"),
            vec!["2021-12-06 13:30", "2021-12-07"]
        );
        assert!(split_tokens(ColumnKind::Text, "  ").is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(compile(&real_column(), FilterOp::Gte, ""), Err(FilterError::Empty));
        assert_eq!(
            compile(&real_column(), FilterOp::Gte, "abc"),
            Err(FilterError::InvalidNumber("abc".into()))
        );
        assert!(matches!(
            compile(&column_of(ColumnKind::Integer), FilterOp::Eq, "1.5"),
            Err(FilterError::InvalidInteger(_))
        ));
        assert!(matches!(
            compile(&column_of(ColumnKind::Time), FilterOp::Gte, "yesterday"),
            Err(FilterError::InvalidTime(_))
        ));
        assert!(matches!(
            compile(&column_of(ColumnKind::Enum), FilterOp::InList, "SSC, XYZ"),
            Err(FilterError::NotAVariant(_))
        ));
    }

    #[test]
    fn test_time_input_is_utc() {
        let p = compile(&column_of(ColumnKind::Time), FilterOp::Gte, "2021-12-06 12:00").unwrap();
        let noon = Utc.with_ymd_and_hms(2021, 12, 6, 12, 0, 0).unwrap();
        assert_eq!(p, Predicate::Compare(FilterOp::Gte, Value::Time(noon)));
        assert!(p.matches(&Value::Time(noon)));
        assert!(!p.matches(&Value::Time(noon - chrono::Duration::seconds(1))));
    }

    #[test]
    fn test_enum_select_falls_back_to_first_variant() {
        let column = column_of(ColumnKind::Enum);
        assert!(is_select_input(&column, FilterOp::Eq));
        assert!(!is_select_input(&column, FilterOp::InList));
        assert_eq!(effective_input(&column, FilterOp::Eq, "bogus"), "SSC");
        assert_eq!(effective_input(&column, FilterOp::Eq, "SI"), "SI");
        assert_eq!(effective_input(&column, FilterOp::Includes, "bogus"), "bogus");
        let p = compile(&column, FilterOp::Eq, "").unwrap();
        assert!(p.matches(&Value::Text("SSC".into())));
    }

    #[test]
    fn test_includes_uses_display_string() {
        let p = compile(&real_column(), FilterOp::Includes, "2.5").unwrap();
        assert!(p.matches(&Value::Real(12.5)));
        assert!(!p.matches(&Value::Real(2.0)));
        assert!(!p.matches(&Value::Null));
        let t = Utc.with_ymd_and_hms(2021, 12, 6, 13, 0, 0).unwrap();
        let p = compile(&column_of(ColumnKind::Time), FilterOp::Includes, "12-06 13").unwrap();
        assert!(p.matches(&Value::Time(t)));
    }

    #[test]
    fn test_null_checks_and_not_equal() {
        assert!(compile(&real_column(), FilterOp::IsNull, "x").unwrap().matches(&Value::Null));
        assert!(!compile(&real_column(), FilterOp::NotNull, "").unwrap().matches(&Value::Null));
        let ne = compile(&real_column(), FilterOp::Ne, "3").unwrap();
        assert!(ne.matches(&Value::Null));
        assert!(!ne.matches(&Value::Integer(3)));
    }

    #[test]
    fn test_invalid_filter_is_skipped() {
        let columns = vec![real_column()];
        let mut set = FilterSet::new();
        let good = set.add(
            FilterDraft {
                column: "magnitude".into(),
                operation: FilterOp::Gte,
                value: "5".into(),
            },
            &columns,
        );
        let bad = set.add(draft_from_cursor(None), &columns);
        assert!(set.get_mut(good).unwrap().is_valid());
        assert_eq!(set.get_mut(bad).unwrap().error(), Some(&FilterError::Empty));
        assert_eq!(set.active().count(), 1);
        assert_eq!(set.mask(&numbers(&[3.0, 6.0])), vec![false, true]);

        // Typing a value makes it take part
        set.get_mut(bad).unwrap().set_value("7", &columns);
        assert_eq!(set.mask(&numbers(&[3.0, 6.0, 8.0])), vec![false, false, true]);
    }

    #[test]
    fn test_setters_recompile() {
        let columns = columns_from_info(&sample_info());
        let mut f = Filter::new(0, "magnitude", FilterOp::Gte, "2", &columns);
        assert!(f.is_valid());
        f.set_column("onset_type", &columns);
        // Select input falls back to "SSC"
        assert!(f.is_valid());
        f.set_operation(FilterOp::InList, &columns);
        assert_eq!(f.error(), Some(&FilterError::NotAVariant("2".into())));
        f.set_column("nope", &columns);
        assert_eq!(f.error(), Some(&FilterError::UnknownColumn("nope".into())));
    }

    #[test]
    fn test_draft_from_cursor() {
        let columns = columns_from_info(&sample_info());
        let t = Utc.with_ymd_and_hms(2021, 12, 6, 13, 0, 0).unwrap();

        let d = draft_from_cursor(Some((&columns[0], &Value::Time(t))));
        assert_eq!((d.operation, d.value.as_str()), (FilterOp::Gte, "2021-12-06"));
        let d = draft_from_cursor(Some((&columns[1], &Value::Null)));
        assert_eq!(d.operation, FilterOp::IsNull);
        let d = draft_from_cursor(Some((&columns[2], &Value::Text("SI".into()))));
        assert_eq!((d.operation, d.value.as_str()), (FilterOp::Eq, "SI"));
        let d = draft_from_cursor(Some((&columns[5], &Value::Text("X1".into()))));
        assert_eq!(d.operation, FilterOp::Includes);
        let d = draft_from_cursor(None);
        assert_eq!((d.column.as_str(), d.operation, d.value.as_str()), ("magnitude", FilterOp::Gte, ""));
    }

    #[test]
    fn test_remove_last_and_by_id() {
        let columns = vec![real_column()];
        let mut set = FilterSet::new();
        let a = set.add(draft_from_cursor(None), &columns);
        let b = set.add(draft_from_cursor(None), &columns);
        assert_ne!(a, b);
        assert_eq!(set.remove_last().map(|f| f.id), Some(b));
        assert_eq!(set.remove(a).map(|f| f.id), Some(a));
        assert!(set.is_empty());
        assert!(set.remove_last().is_none());
    }

    proptest! {
        #[test]
        fn filter_order_does_not_matter(
            values in proptest::collection::vec(-100i32..100, 0..50),
            lo in -100i32..100,
            hi in -100i32..100,
        ) {
            let columns = vec![real_column()];
            let rows = numbers(&values.iter().map(|v| *v as f64).collect::<Vec<_>>());
            let gte = FilterDraft { column: "magnitude".into(), operation: FilterOp::Gte, value: lo.to_string() };
            let lte = FilterDraft { column: "magnitude".into(), operation: FilterOp::Lte, value: hi.to_string() };

            let mut forward = FilterSet::new();
            forward.add(gte.clone(), &columns);
            forward.add(lte.clone(), &columns);
            let mut backward = FilterSet::new();
            backward.add(lte, &columns);
            backward.add(gte, &columns);

            let expected: Vec<bool> = values.iter().map(|v| *v >= lo && *v <= hi).collect();
            prop_assert_eq!(forward.mask(&rows), expected.clone());
            prop_assert_eq!(backward.mask(&rows), expected);
        }
    }
}
