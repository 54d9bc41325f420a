//! Chart option builders.
//!
//! Options are plain serializable data. The chart shim on the JS side turns
//! them into charting library options, resolving theme colors and wiring
//! tick formatting and hit-testing back into Rust hooks.

use crate::axis::TickFormat;
use crate::interaction::{CirclesCallbacks, CirclesInteraction};
use crate::overlays::{MagneticCloud, Onset, Overlays};
use aid_data::circles::{CirclesData, PlotBuffer};
use aid_data::series::LineData;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use std::rc::Rc;

/// Fixed range of the asymptotic longitude axis, degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-5.0, 365.0);
/// Fixed range of the precursor index axis.
pub const PRECURSOR_RANGE: (f64, f64) = (-0.04, 3.62);

/// Circle diameters, pixels, and the variation (%) drawn at full size.
const CIRCLE_MIN_PX: f64 = 3.0;
const CIRCLE_MAX_PX: f64 = 24.0;
const CIRCLE_FULL_SCALE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A theme color (`--color-<name>` CSS variable) or a literal CSS color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    Theme { theme: String, opacity: f64 },
    Css(String),
}

impl Color {
    pub fn theme(name: &str) -> Self {
        Self::theme_alpha(name, 1.0)
    }

    pub fn theme_alpha(name: &str, opacity: f64) -> Self {
        Color::Theme {
            theme: name.to_string(),
            opacity,
        }
    }

    pub fn css(value: &str) -> Self {
        Color::Css(value.to_string())
    }
}

/// Layout of the data array handed to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    /// One shared x column.
    Aligned,
    /// Every series carries its own columns.
    Faceted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Splits {
    Auto,
    /// Whole-hour splits from [`crate::axis::time_splits`].
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub scale: String,
    pub side: Side,
    pub show: bool,
    pub grid: bool,
    pub ticks: TickFormat,
    pub splits: Splits,
    pub size: Option<f64>,
    pub space: Option<f64>,
    pub stroke: Color,
    pub grid_stroke: Color,
}

impl Axis {
    fn new(scale: &str, side: Side) -> Self {
        Self {
            scale: scale.to_string(),
            side,
            show: true,
            grid: true,
            ticks: TickFormat::Default,
            splits: Splits::Auto,
            size: None,
            space: None,
            stroke: Color::theme("text"),
            grid_stroke: Color::theme("grid"),
        }
    }

    fn ticks(mut self, ticks: TickFormat) -> Self {
        self.ticks = ticks;
        self
    }

    fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Range {
    /// Library default padding.
    Auto,
    /// Exactly the data extent.
    Data,
    Fixed { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub time: bool,
    pub range: Range,
    pub distr: Distribution,
}

impl Scale {
    fn linear(range: Range) -> Self {
        Self {
            time: false,
            range,
            distr: Distribution::Linear,
        }
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paths {
    Line { width: f64 },
    /// Circles sized by `|value|`, registered for hit-testing.
    Circles { min_px: f64, max_px: f64, full_scale: f64 },
}

/// Diameter of a circle for `value` on a [`Paths::Circles`] series.
pub fn circle_size(value: f64, min_px: f64, max_px: f64, full_scale: f64) -> f64 {
    if !value.is_finite() || full_scale <= 0.0 {
        return min_px;
    }
    let ratio = (value.abs() / full_scale).min(1.0);
    min_px + (max_px - min_px) * ratio
}

/// Where the legend value of a series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendValue {
    Default,
    /// Hovered circle description from the interaction hooks.
    HoveredPoint,
    /// `YYYY-MM-DD HH:mm` of the cursor time.
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub scale: String,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub paths: Paths,
    pub points: bool,
    pub legend: LegendValue,
}

impl Series {
    fn line(label: &str, scale: &str, stroke: Color, width: f64) -> Self {
        Self {
            label: label.to_string(),
            scale: scale.to_string(),
            stroke: Some(stroke),
            fill: None,
            paths: Paths::Line { width },
            points: false,
            legend: LegendValue::Default,
        }
    }

    fn x(label: &str, legend: LegendValue) -> Self {
        Self {
            label: label.to_string(),
            scale: "x".to_string(),
            stroke: None,
            fill: None,
            paths: Paths::Line { width: 0.0 },
            points: false,
            legend,
        }
    }
}

/// Which Rust hook set the shim wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hooks {
    None,
    Circles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(flatten)]
    pub size: Size,
    /// Top, right, bottom, left.
    pub padding: [f64; 4],
    pub mode: DataMode,
    pub legend: bool,
    pub cursor: bool,
    pub axes: Vec<Axis>,
    pub scales: IndexMap<String, Scale>,
    pub series: Vec<Series>,
    pub overlays: Overlays,
    pub hooks: Hooks,
}

impl ChartOptions {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Options and interaction state for the ring-of-stations scatter plot.
///
/// The returned interaction must outlive the chart: the shim calls into it
/// on every redraw and pointer event when `interactive` is set.
pub fn circles_chart(
    size: Size,
    interactive: bool,
    data: Rc<CirclesData>,
    callbacks: CirclesCallbacks,
) -> (ChartOptions, CirclesInteraction) {
    let mut scales = IndexMap::new();
    scales.insert("x".to_string(), Scale::linear(Range::Data));
    scales.insert(
        "y".to_string(),
        Scale::linear(Range::Fixed {
            min: LONGITUDE_RANGE.0,
            max: LONGITUDE_RANGE.1,
        }),
    );
    scales.insert(
        "idx".to_string(),
        Scale::linear(Range::Fixed {
            min: PRECURSOR_RANGE.0,
            max: PRECURSOR_RANGE.1,
        }),
    );

    let mut x_axis = Axis::new("x", Side::Bottom).ticks(TickFormat::DayHour);
    x_axis.size = Some(40.0);
    x_axis.space = Some(70.0);

    let circles = Paths::Circles {
        min_px: CIRCLE_MIN_PX,
        max_px: CIRCLE_MAX_PX,
        full_scale: CIRCLE_FULL_SCALE,
    };
    let bubble = |label: &str, rgb: &str| Series {
        label: label.to_string(),
        scale: "y".to_string(),
        stroke: Some(Color::css(&format!("rgba({},1)", rgb))),
        fill: Some(Color::css(&format!("rgba({},0.5)", rgb))),
        paths: circles,
        points: false,
        legend: LegendValue::HoveredPoint,
    };

    let options = ChartOptions {
        size,
        padding: [0.0; 4],
        mode: DataMode::Faceted,
        legend: interactive,
        cursor: interactive,
        axes: vec![
            x_axis,
            Axis::new("y", Side::Left).ticks(TickFormat::Integer),
            Axis::new("idx", Side::Right).hidden(),
        ],
        scales,
        series: vec![
            Series::x("time", LegendValue::Default),
            bubble("+", "0,255,255"),
            bubble("-", "255,10,110"),
            Series::line("idx", "idx", Color::css("rgba(255,170,0,0.9)"), 1.75),
        ],
        overlays: Overlays::default(),
        hooks: if interactive { Hooks::Circles } else { Hooks::None },
    };
    (options, CirclesInteraction::new(data, callbacks))
}

/// Faceted chart data for the circles plot:
/// `[x, [time, angle, value, station, size] (+), [...] (-), [time, idx]]`.
pub fn circles_payload(data: &CirclesData) -> Value {
    let facet = |buf: &PlotBuffer| {
        let sizes: Vec<f64> = buf
            .value
            .iter()
            .map(|v| circle_size(*v, CIRCLE_MIN_PX, CIRCLE_MAX_PX, CIRCLE_FULL_SCALE))
            .collect();
        json!([buf.time, buf.angle, buf.value, buf.station_index, sizes])
    };
    let (idx_time, idx_value) = &data.precursor_idx;
    json!([idx_time, facet(&data.positive), facet(&data.negative), [idx_time, idx_value]])
}

/// Aligned chart data: `[time, series...]` with gaps as nulls.
pub fn line_payload(data: &LineData) -> Value {
    let mut columns = Vec::with_capacity(data.series.len() + 1);
    columns.push(json!(data.time));
    columns.extend(data.series.iter().map(|s| json!(s)));
    Value::Array(columns)
}

/// Inputs of the solar-wind plot besides the data itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolarWindParams {
    pub interactive: bool,
    pub use_temperature_index: bool,
    pub onsets: Vec<Onset>,
    pub clouds: Vec<MagneticCloud>,
}

impl SolarWindParams {
    pub fn temperature_field(&self) -> &'static str {
        if self.use_temperature_index {
            "temperature_idx"
        } else {
            "sw_temperature"
        }
    }

    /// Columns to request, in series order.
    pub fn fields(&self) -> [&'static str; 4] {
        ["time", self.temperature_field(), "plasma_beta", "sw_density"]
    }
}

/// Options for the solar-wind line plot: temperature on its own (log)
/// scale, density and plasma beta on a shared linear one.
pub fn solar_wind_options(size: Size, params: &SolarWindParams) -> ChartOptions {
    let mut scales = IndexMap::new();
    scales.insert(
        "x".to_string(),
        Scale {
            time: true,
            range: Range::Auto,
            distr: Distribution::Linear,
        },
    );
    scales.insert("y".to_string(), Scale::linear(Range::Auto));
    scales.insert(
        "temp".to_string(),
        Scale {
            time: false,
            range: Range::Auto,
            distr: if params.use_temperature_index {
                Distribution::Linear
            } else {
                Distribution::Log
            },
        },
    );

    let mut x_axis = Axis::new("x", Side::Bottom).ticks(TickFormat::DaySplits);
    x_axis.splits = Splits::Time;
    let mut temp_axis = Axis::new("temp", Side::Left);
    temp_axis.grid = false;
    if !params.use_temperature_index {
        temp_axis.ticks = TickFormat::LogExponent;
    }

    let temp_label = if params.use_temperature_index {
        "Tp index"
    } else {
        "Tp, K"
    };
    let overlays = Overlays::new(&params.onsets, &params.clouds)
        .with_label("temp", temp_label)
        .with_label("y", "Dp, N/cm³ & beta");

    ChartOptions {
        size,
        padding: [7.0, 0.0, 12.0, 0.0],
        mode: DataMode::Aligned,
        legend: params.interactive,
        cursor: params.interactive,
        axes: vec![x_axis, Axis::new("y", Side::Right), temp_axis],
        scales,
        series: vec![
            Series::x("time", LegendValue::DateTime),
            Series::line("Tp", "temp", Color::theme("cyan"), 2.0),
            Series::line("beta", "y", Color::theme("magenta"), 2.0),
            Series::line("Dp", "y", Color::theme("peach"), 2.0),
        ],
        overlays,
        hooks: Hooks::None,
    }
}
