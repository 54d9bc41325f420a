//! Interval picker with start and end inputs.
//!
//! Accepts anything `parse_time_input` does (`2021-12-06`, `2021-12-06 13:00`,
//! RFC 3339), always read as UTC.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn IntervalPicker() -> Element {
    let mut state = use_context::<AppState>();
    let from = (state.interval_from)();
    let to = (state.interval_to)();
    let invalid = state.interval().err();

    let on_from_change = move |evt: Event<FormData>| {
        state.interval_from.set(evt.value());
    };

    let on_to_change = move |evt: Event<FormData>| {
        state.interval_to.set(evt.value());
    };

    let border = if invalid.is_some() {
        "border-color: var(--color-red, #C62828);"
    } else {
        ""
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    r#type: "text",
                    style: "width: 10em; {border}",
                    value: "{from}",
                    onchange: on_from_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    r#type: "text",
                    style: "width: 10em; {border}",
                    value: "{to}",
                    onchange: on_to_change,
                }
            }
            if let Some(reason) = invalid {
                span {
                    style: "font-size: 12px; color: var(--color-red, #C62828);",
                    "{reason}"
                }
            }
        }
    }
}
