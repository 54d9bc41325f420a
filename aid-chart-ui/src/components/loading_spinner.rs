//! Loading indicator.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            class: "Center",
            style: "display: flex; justify-content: center; align-items: center; padding: 40px;",
            "LOADING..."
        }
    }
}
