//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use aid_api::TimeInterval;
use aid_table::column::ColumnDef;
use aid_table::{FilterSet, Row, TableWindow};
use aid_utils::dates::parse_time_input;
use dioxus::prelude::*;

/// Interval shown when an app opens.
pub const DEFAULT_FROM: &str = "2021-12-06";
pub const DEFAULT_TO: &str = "2021-12-12";

/// Shared application state for all space-weather apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Interval start as typed
    pub interval_from: Signal<String>,
    /// Interval end as typed
    pub interval_to: Signal<String>,
    /// Error message for input the apps cannot use
    pub error_msg: Signal<Option<String>>,
    /// Base day of the circles plot, unix seconds (None lets the server pick)
    pub base: Signal<Option<i64>>,
    /// Stations left out of the circles plot
    pub exclude: Signal<Vec<String>>,
    /// Time last clicked on the circles plot, unix seconds
    pub selected_time: Signal<Option<f64>>,
    /// Plot the temperature index instead of the temperature
    pub use_temperature_index: Signal<bool>,
    /// Events table columns, catalogue order
    pub columns: Signal<Vec<ColumnDef>>,
    /// Events table rows
    pub rows: Signal<Vec<Row>>,
    pub filters: Signal<FilterSet>,
    pub table_window: Signal<TableWindow>,
    /// `(row, column)` of the table cursor within the filtered rows
    pub cursor: Signal<Option<(usize, usize)>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            interval_from: Signal::new(DEFAULT_FROM.to_string()),
            interval_to: Signal::new(DEFAULT_TO.to_string()),
            error_msg: Signal::new(None),
            base: Signal::new(None),
            exclude: Signal::new(Vec::new()),
            selected_time: Signal::new(None),
            use_temperature_index: Signal::new(false),
            columns: Signal::new(Vec::new()),
            rows: Signal::new(Vec::new()),
            filters: Signal::new(FilterSet::new()),
            table_window: Signal::new(TableWindow::default()),
            cursor: Signal::new(None),
        }
    }

    /// The typed interval, if both ends parse and are in order.
    pub fn interval(&self) -> Result<TimeInterval, String> {
        parse_interval(&(self.interval_from)(), &(self.interval_to)())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_interval(from: &str, to: &str) -> Result<TimeInterval, String> {
    let from = parse_time_input(from).map_err(|e| e.to_string())?;
    let to = parse_time_input(to).map_err(|e| e.to_string())?;
    if to <= from {
        return Err("Interval end must be after its start".to_string());
    }
    Ok(TimeInterval::new(from, to))
}
