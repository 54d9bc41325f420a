//! Ring of Stations Plot
//!
//! Cosmic ray variation per neutron monitor station, drawn as circles over
//! time (x) and asymptotic longitude (y), with the precursor index on its own
//! hidden scale. Clicking near a time selects it; dragging the shaded band
//! moves the base day and refetches.
//!
//! Data flow:
//! 1. The interval, base day and excluded stations feed a `use_resource`
//!    that fetches the variation grid and reshapes it into plot buffers.
//! 2. Once data is in, hooks are installed on `window.__aidHooks` and the
//!    chart shim renders into the container.

use aid_api::client::ApiClient;
use aid_api::CirclesParams;
use aid_chart_ui::components::{
    ChartContainer, ChartHeader, IntervalPicker, LoadStatus, StatusMessage,
};
use aid_chart_ui::hooks::{install_circles, install_tick_hooks};
use aid_chart_ui::js_bridge;
use aid_chart_ui::state::AppState;
use aid_data::circles::{reshape, CirclesData};
use aid_plot::options::circles_payload;
use aid_plot::{circles_chart, CirclesCallbacks, Size};
use aid_utils::dates::{format_date_time, from_unix};
use anyhow::Context;
use dioxus::prelude::*;
use std::rc::Rc;

/// Chart container DOM element ID the shim renders into.
const CHART_ID: &str = "circles-plot";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("circles-root"))
        .launch(App);
}

async fn load(params: CirclesParams) -> anyhow::Result<Option<CirclesData>> {
    let resp = ApiClient::default()
        .fetch_circles(&params)
        .await
        .context("ring of stations request failed")?;
    Ok(reshape(&resp))
}

#[component]
fn App() -> Element {
    web_sys::console::log_1(&"[AID] circles App component mounted".into());

    let state = use_context_provider(AppState::new);

    let data = use_resource(move || async move {
        let interval = state.interval()?;
        let mut params = CirclesParams::new(interval).with_exclude((state.exclude)());
        if let Some(base) = (state.base)().and_then(|b| from_unix(b as f64)) {
            params = params.with_base(base);
        }
        log::info!("[AID] circles: loading {}", params.query_key());
        load(params)
            .await
            .map(|d| d.map(Rc::new))
            .map_err(|e| format!("{:#}", e))
    });

    use_effect(move || {
        let plot_data = match &*data.read() {
            Some(Ok(Some(d))) => d.clone(),
            _ => return,
        };

        js_bridge::init_charts();
        if let Err(e) = install_tick_hooks() {
            log::error!("[AID] failed to install tick hooks: {:?}", e);
        }

        let mut selected_time = state.selected_time;
        let mut base = state.base;
        let callbacks = CirclesCallbacks {
            on_click: Some(Box::new(move |time| selected_time.set(Some(time)))),
            on_base_change: Some(Box::new(move |start| base.set(Some(start)))),
        };
        let (options, interaction) =
            circles_chart(Size::new(800, 400), true, plot_data.clone(), callbacks);
        if let Err(e) = install_circles(interaction) {
            log::error!("[AID] failed to install circles hooks: {:?}", e);
            return;
        }
        let payload = circles_payload(&plot_data).to_string();
        log::info!(
            "[AID] circles: rendering {} points ({} null)",
            plot_data.counts.total(),
            plot_data.counts.null
        );
        js_bridge::render_circles_plot(CHART_ID, &payload, &options.to_json());
    });

    use_drop(|| js_bridge::destroy_chart(CHART_ID));

    let status = match &*data.read() {
        None => Some(LoadStatus::Loading),
        Some(Err(e)) => Some(LoadStatus::Failed(e.clone())),
        Some(Ok(None)) => Some(LoadStatus::NoData),
        Some(Ok(Some(_))) => None,
    };

    let selected = (state.selected_time)()
        .and_then(from_unix)
        .map(|t| format_date_time(&t));

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Ring of Stations".to_string(),
                subtitle: "Cosmic ray variation, % vs asymptotic longitude".to_string(),
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; margin-bottom: 8px;",
                IntervalPicker {}
                ExcludeInput {}
            }

            if let Some(status) = status {
                StatusMessage { status }
            } else {
                ChartContainer {
                    id: CHART_ID.to_string(),
                    min_height: 400,
                }
                if let Some(time) = selected {
                    div {
                        style: "margin-top: 8px; font-size: 14px;",
                        "Selected: {time}"
                    }
                }
            }
        }
    }
}

/// Comma separated station codes to leave out of the plot.
#[component]
fn ExcludeInput() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.exclude)().join(",");

    let on_change = move |evt: Event<FormData>| {
        let stations: Vec<String> = evt
            .value()
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        state.exclude.set(stations);
    };

    rsx! {
        label {
            style: "font-weight: bold;",
            "Exclude: "
            input {
                r#type: "text",
                style: "width: 12em;",
                placeholder: "APTY,NAIN",
                value: "{current}",
                onchange: on_change,
            }
        }
    }
}
