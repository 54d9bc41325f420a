//! The three states a data view shows instead of its content.

use super::{ErrorDisplay, LoadingSpinner};
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    /// The request failed; carries the reason.
    Failed(String),
    /// The server answered but there is nothing to plot.
    NoData,
}

#[derive(Props, Clone, PartialEq)]
pub struct StatusMessageProps {
    pub status: LoadStatus,
}

#[component]
pub fn StatusMessage(props: StatusMessageProps) -> Element {
    match props.status {
        LoadStatus::Loading => rsx! { LoadingSpinner {} },
        LoadStatus::Failed(message) => rsx! { ErrorDisplay { message } },
        LoadStatus::NoData => rsx! {
            div {
                class: "Center",
                style: "display: flex; justify-content: center; align-items: center; padding: 40px;",
                "NO DATA"
            }
        },
    }
}
