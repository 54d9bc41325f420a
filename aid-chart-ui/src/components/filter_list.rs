//! Filter cards plus the add/remove actions.

use super::FilterCard;
use crate::state::AppState;
use aid_table::filter::draft_from_cursor;
use dioxus::prelude::*;
use log::info;

/// Adds a filter from the cell under the table cursor (or a default
/// `magnitude >=` one), removes the last one, and lists the cards.
#[component]
pub fn FilterList() -> Element {
    let mut state = use_context::<AppState>();
    let ids: Vec<u64> = state.filters.read().filters().iter().map(|f| f.id).collect();
    let no_filters = ids.is_empty();

    let add_filter = move |_| {
        let columns = state.columns.read();
        let draft = {
            let rows = state.rows.read();
            let filters = state.filters.read();
            let visible = filters.apply(&rows);
            let cursor = (state.cursor)().and_then(|(row, col)| {
                let cell = visible.get(row)?.get(col)?;
                Some((columns.get(col)?, cell))
            });
            draft_from_cursor(cursor)
        };
        info!("[AID] table: add filter {} {}", draft.column, draft.operation);
        state.filters.write().add(draft, &columns);
    };
    let remove_filter = move |_| {
        state.filters.write().remove_last();
    };

    rsx! {
        div {
            class: "Filters",
            style: "display: flex; flex-wrap: wrap; gap: 6px; align-items: center; margin: 8px 0;",
            button { onclick: add_filter, "Add filter" }
            button { disabled: no_filters, onclick: remove_filter, "Remove filter" }
            for id in ids {
                FilterCard { key: "{id}", id }
            }
        }
    }
}
