//! Solar Wind Plot
//!
//! Proton temperature (or the temperature index), plasma beta and density
//! from the OMNI endpoint, with event onsets drawn as vertical markers and
//! magnetic clouds as shaded bands.
//!
//! Data flow:
//! 1. The interval and temperature toggle feed a `use_resource` that fetches
//!    the OMNI columns and the events in the same interval.
//! 2. Event rows become overlays; a failed events request only costs the
//!    overlays, never the plot.
//! 3. Options and the aligned data array are handed to the chart shim.

use aid_api::client::ApiClient;
use aid_api::{TimeInterval, OMNI_PATH};
use aid_chart_ui::components::{
    ChartContainer, ChartHeader, IntervalPicker, LoadStatus, StatusMessage,
};
use aid_chart_ui::hooks::install_tick_hooks;
use aid_chart_ui::js_bridge;
use aid_chart_ui::state::AppState;
use aid_data::series::LineData;
use aid_plot::options::line_payload;
use aid_plot::overlays::events_overlays;
use aid_plot::{solar_wind_options, Size, SolarWindParams};
use anyhow::Context;
use dioxus::prelude::*;
use std::rc::Rc;

/// Chart container DOM element ID the shim renders into.
const CHART_ID: &str = "solar-wind-plot";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("solar-wind-root"))
        .launch(App);
}

struct SolarWind {
    data: LineData,
    params: SolarWindParams,
}

async fn load(interval: TimeInterval, mut params: SolarWindParams) -> anyhow::Result<Option<SolarWind>> {
    let client = ApiClient::default();
    let columns = client
        .fetch_columns(OMNI_PATH, &interval, &params.fields())
        .await
        .context("solar wind request failed")?;
    let Some(data) = columns.as_deref().and_then(LineData::from_columns) else {
        return Ok(None);
    };

    match client.fetch_events(Some(&interval)).await {
        Ok(events) => {
            let (onsets, clouds) = events_overlays(&events.fields, &events.data);
            log::info!("[AID] solar wind: {} onsets, {} clouds", onsets.len(), clouds.len());
            params.onsets = onsets;
            params.clouds = clouds;
        }
        Err(e) => log::warn!("[AID] solar wind: events unavailable, drawing without overlays: {}", e),
    }
    Ok(Some(SolarWind { data, params }))
}

#[component]
fn App() -> Element {
    web_sys::console::log_1(&"[AID] solar wind App component mounted".into());

    let state = use_context_provider(AppState::new);

    let plot = use_resource(move || async move {
        let interval = state.interval()?;
        let params = SolarWindParams {
            interactive: true,
            use_temperature_index: (state.use_temperature_index)(),
            ..SolarWindParams::default()
        };
        load(interval, params)
            .await
            .map(|p| p.map(Rc::new))
            .map_err(|e| format!("{:#}", e))
    });

    use_effect(move || {
        let sw = match &*plot.read() {
            Some(Ok(Some(sw))) => sw.clone(),
            _ => return,
        };
        js_bridge::init_charts();
        if let Err(e) = install_tick_hooks() {
            log::error!("[AID] failed to install tick hooks: {:?}", e);
        }
        let options = solar_wind_options(Size::new(800, 360), &sw.params);
        let payload = line_payload(&sw.data).to_string();
        log::info!("[AID] solar wind: rendering {} rows", sw.data.len());
        js_bridge::render_line_plot(CHART_ID, &payload, &options.to_json());
    });

    use_drop(|| js_bridge::destroy_chart(CHART_ID));

    let status = match &*plot.read() {
        None => Some(LoadStatus::Loading),
        Some(Err(e)) => Some(LoadStatus::Failed(e.clone())),
        Some(Ok(None)) => Some(LoadStatus::NoData),
        Some(Ok(Some(_))) => None,
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Solar Wind".to_string(),
                subtitle: "Proton temperature, plasma beta and density (OMNI)".to_string(),
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; margin-bottom: 8px;",
                IntervalPicker {}
                TemperatureToggle {}
            }

            if let Some(status) = status {
                StatusMessage { status }
            } else {
                ChartContainer {
                    id: CHART_ID.to_string(),
                    min_height: 360,
                }
            }
        }
    }
}

#[component]
fn TemperatureToggle() -> Element {
    let mut state = use_context::<AppState>();
    let checked = (state.use_temperature_index)();

    rsx! {
        label {
            style: "font-weight: bold;",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |evt: Event<FormData>| state.use_temperature_index.set(evt.checked()),
            }
            " Use temperature index"
        }
    }
}
