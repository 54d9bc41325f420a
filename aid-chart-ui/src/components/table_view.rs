//! Paged view of the filtered event rows.

use crate::state::AppState;
use aid_table::column::header_groups;
use aid_table::Row;
use dioxus::prelude::*;

/// Ten rows at a time; the wheel scrolls half a page. The window returns to
/// the first page whenever the filtered row set changes.
#[component]
pub fn TableView() -> Element {
    let mut state = use_context::<AppState>();

    let filtered = use_memo(move || {
        let rows = state.rows.read();
        let filters = state.filters.read();
        filters.apply(&rows).into_iter().cloned().collect::<Vec<Row>>()
    });

    use_effect(move || {
        let len = filtered.read().len();
        let generation = state.table_window.peek().generation() + 1;
        state.table_window.write().sync(len, generation);
        state.cursor.set(None);
    });

    let columns = state.columns.read();
    let groups = header_groups(&columns);
    let names: Vec<(String, String)> = columns
        .iter()
        .map(|c| (format!("{}{}", c.table, c.id), c.name.clone()))
        .collect();
    drop(columns);

    let window = (state.table_window)();
    let start = window.start();
    let rows = filtered.read();
    let visible: Vec<(usize, Vec<String>)> = window
        .visible(rows.as_slice())
        .iter()
        .enumerate()
        .map(|(i, row)| (start + i, row.iter().map(|v| v.to_string()).collect()))
        .collect();
    drop(rows);
    let cursor = (state.cursor)();
    let footer = window.footer();

    let on_wheel = move |evt: Event<WheelData>| {
        let delta_y = evt.delta().strip_units().y;
        state.table_window.write().scroll(delta_y);
    };

    rsx! {
        div {
            class: "Table",
            onwheel: on_wheel,
            table {
                thead {
                    tr {
                        for (table, span) in groups {
                            td { key: "{table}", colspan: "{span}", "{table}" }
                        }
                    }
                    tr {
                        for (key, name) in names {
                            td { key: "{key}", "{name}" }
                        }
                    }
                }
                tbody {
                    for (row_idx, cells) in visible {
                        tr {
                            key: "{row_idx}",
                            for (col_idx, text) in cells.into_iter().enumerate() {
                                td {
                                    key: "{col_idx}",
                                    class: if cursor == Some((row_idx, col_idx)) { "Cursor" } else { "" },
                                    onclick: move |_| state.cursor.set(Some((row_idx, col_idx))),
                                    span { "{text}" }
                                }
                            }
                        }
                    }
                }
            }
            div {
                style: "text-align: left; color: var(--color-text-dark, #888); font-size: 14px;",
                "{footer}"
            }
        }
    }
}
