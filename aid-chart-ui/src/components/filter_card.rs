//! One filter: column, operation and input, with a close button.

use crate::state::AppState;
use aid_table::column::{find_column, pretty_column};
use aid_table::filter::{effective_input, is_select_input};
use aid_table::FilterOp;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct FilterCardProps {
    /// Id of the filter within `AppState::filters`
    pub id: u64,
}

#[component]
pub fn FilterCard(props: FilterCardProps) -> Element {
    let mut state = use_context::<AppState>();
    let id = props.id;

    let Some(filter) = state.filters.read().filters().iter().find(|f| f.id == id).cloned() else {
        return rsx! {};
    };
    let columns = state.columns.read();
    let column = find_column(&columns, filter.column()).map(|(_, c)| c.clone());
    let operation = filter.operation();
    let error = filter.error().map(|e| e.to_string());

    let options: Vec<(String, String)> = columns
        .iter()
        .filter(|c| !c.hidden)
        .map(|c| (c.id.clone(), pretty_column(&columns, c)))
        .collect();
    drop(columns);

    let select_input = column
        .as_ref()
        .is_some_and(|c| is_select_input(c, operation));
    let input = match &column {
        Some(c) => effective_input(c, operation, filter.value()).to_string(),
        None => filter.value().to_string(),
    };
    let variants = column.map(|c| c.variants).unwrap_or_default();

    let on_column = move |evt: Event<FormData>| {
        let columns = state.columns.read();
        if let Some(f) = state.filters.write().get_mut(id) {
            f.set_column(&evt.value(), &columns);
        }
    };
    let on_operation = move |evt: Event<FormData>| {
        let Some(op) = FilterOp::from_label(&evt.value()) else {
            return;
        };
        let columns = state.columns.read();
        if let Some(f) = state.filters.write().get_mut(id) {
            f.set_operation(op, &columns);
        }
    };
    let on_input = move |evt: Event<FormData>| {
        let columns = state.columns.read();
        if let Some(f) = state.filters.write().get_mut(id) {
            f.set_value(&evt.value(), &columns);
        }
    };
    let destruct = move |_| {
        state.filters.write().remove(id);
    };

    let op_width = if operation.takes_input() { "62px" } else { "8em" };
    let invalid_style = if error.is_some() {
        "border-color: var(--color-red, #C62828);"
    } else {
        ""
    };
    let current_column = filter.column().to_string();
    let op_label = operation.label();

    rsx! {
        div {
            class: "FilterCard",
            title: error.unwrap_or_default(),
            select {
                style: "width: 8em; text-align: right; border-color: transparent;",
                value: "{current_column}",
                onchange: on_column,
                for (value, label) in options {
                    option { key: "{value}", value: "{value}", "{label}" }
                }
            }
            select {
                style: "width: {op_width}; text-align: center; border-color: transparent;",
                value: "{op_label}",
                onchange: on_operation,
                for label in FilterOp::ALL.map(|op| op.label()) {
                    option { key: "{label}", value: "{label}", "{label}" }
                }
            }
            if operation.takes_input() && !select_input {
                input {
                    r#type: "text",
                    autofocus: true,
                    style: "width: 7em; text-align: center; {invalid_style}",
                    value: "{input}",
                    oninput: on_input,
                }
            }
            if operation.takes_input() && select_input {
                select {
                    style: "width: calc(7em - 4px);",
                    value: "{input}",
                    onchange: on_input,
                    for variant in variants {
                        option { key: "{variant}", value: "{variant}", "{variant}" }
                    }
                }
            }
            span {
                class: "CloseButton",
                onclick: destruct,
                "×"
            }
        }
    }
}
