//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// "FAILED TO LOAD" with the reason underneath.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            class: "Center",
            style: "padding: 12px 16px; text-align: center; color: var(--color-red, #C62828);",
            div { "FAILED TO LOAD" }
            if !props.message.is_empty() {
                div {
                    style: "font-size: 12px;",
                    "{props.message}"
                }
            }
        }
    }
}
