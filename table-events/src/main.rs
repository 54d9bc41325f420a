//! Events Table
//!
//! The events catalogue as a paged table with column filters. Filters are
//! ANDed; an invalid one is marked and ignored until fixed. "Add filter"
//! starts from the cell under the table cursor when there is one.
//!
//! Data flow:
//! 1. On mount, the column catalogue and all event rows are fetched.
//! 2. Cells are typed per column and stored in `AppState`.
//! 3. `FilterList` edits `AppState::filters`; `TableView` pages through the
//!    rows that pass them.

use aid_api::client::ApiClient;
use aid_chart_ui::components::{
    ChartHeader, FilterList, LoadStatus, StatusMessage, TableView,
};
use aid_chart_ui::state::AppState;
use aid_table::column::columns_from_info;
use aid_table::value::rows_from_columnar;
use aid_table::{ColumnDef, Row};
use anyhow::Context;
use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("events-table-root"))
        .launch(App);
}

async fn load() -> anyhow::Result<(Vec<ColumnDef>, Vec<Row>)> {
    let client = ApiClient::default();
    let info = client
        .fetch_tables_info()
        .await
        .context("events catalogue request failed")?;
    let columns = columns_from_info(&info);
    let events = client
        .fetch_events(None)
        .await
        .context("events request failed")?;
    let rows = rows_from_columnar(&events, &columns);
    Ok((columns, rows))
}

#[component]
fn App() -> Element {
    web_sys::console::log_1(&"[AID] events table App component mounted".into());

    let mut state = use_context_provider(AppState::new);

    let loaded = use_resource(move || async move {
        match load().await {
            Ok((columns, rows)) => {
                log::info!("[AID] events table: {} columns, {} rows", columns.len(), rows.len());
                let empty = rows.is_empty();
                state.columns.set(columns);
                state.rows.set(rows);
                Ok(!empty)
            }
            Err(e) => {
                log::error!("[AID] events table: {:#}", e);
                Err(format!("{:#}", e))
            }
        }
    });

    let status = match &*loaded.read() {
        None => Some(LoadStatus::Loading),
        Some(Err(e)) => Some(LoadStatus::Failed(e.clone())),
        Some(Ok(false)) => Some(LoadStatus::NoData),
        Some(Ok(true)) => None,
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Events".to_string(),
                subtitle: "Scroll to page, click a cell to base a new filter on it".to_string(),
            }

            if let Some(status) = status {
                StatusMessage { status }
            } else {
                FilterList {}
                TableView {}
            }
        }
    }
}
