//! Event overlays for time-series plots: onset markers and magnetic cloud bands.

use crate::options::Color;
use aid_utils::dates::{parse_time_input, to_unix};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label drawn next to an onset without a type.
pub const DEFAULT_ONSET_LABEL: &str = "ons";

/// Event table fields read for overlays.
pub const ONSET_TIME_FIELD: &str = "time";
pub const ONSET_TYPE_FIELD: &str = "onset_type";
pub const CLOUD_TIME_FIELD: &str = "mc_time";
pub const CLOUD_DURATION_FIELD: &str = "mc_duration";

/// A labelled event boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Onset {
    /// Unix seconds.
    pub time: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub secondary: bool,
}

impl Onset {
    pub fn new(time: f64, kind: Option<String>, secondary: bool) -> Self {
        Self {
            time,
            kind,
            secondary,
        }
    }

    pub fn label(&self) -> &str {
        match self.kind.as_deref() {
            Some(k) if !k.is_empty() => k,
            _ => DEFAULT_ONSET_LABEL,
        }
    }
}

/// A labelled time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticCloud {
    pub start: f64,
    pub end: f64,
}

impl MagneticCloud {
    /// Cloud lasting `hours` from `start`.
    pub fn from_duration(start: f64, hours: f64) -> Self {
        Self {
            start,
            end: start + hours * 3600.0,
        }
    }
}

/// Vertical line with a label under the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnsetMarker {
    pub time: f64,
    pub label: String,
    pub color: Color,
}

impl From<&Onset> for OnsetMarker {
    fn from(onset: &Onset) -> Self {
        let color = if onset.secondary {
            Color::theme_alpha("text", 0.6)
        } else {
            Color::theme("white")
        };
        Self {
            time: onset.time,
            label: onset.label().to_string(),
            color,
        }
    }
}

/// Shaded background band across the full plot height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudBand {
    pub start: f64,
    pub end: f64,
    pub color: Color,
}

impl From<&MagneticCloud> for CloudBand {
    fn from(cloud: &MagneticCloud) -> Self {
        Self {
            start: cloud.start,
            end: cloud.end,
            color: Color::theme_alpha("skyblue", 0.1),
        }
    }
}

/// Axis title drawn by the chart shim rather than the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub scale: String,
    pub text: String,
}

/// Everything drawn on top of (or under) the series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Overlays {
    pub onsets: Vec<OnsetMarker>,
    pub clouds: Vec<CloudBand>,
    pub labels: Vec<AxisLabel>,
}

impl Overlays {
    pub fn new(onsets: &[Onset], clouds: &[MagneticCloud]) -> Self {
        Self {
            onsets: onsets.iter().map(OnsetMarker::from).collect(),
            clouds: clouds.iter().map(CloudBand::from).collect(),
            labels: Vec::new(),
        }
    }

    pub fn with_label(mut self, scale: &str, text: &str) -> Self {
        self.labels.push(AxisLabel {
            scale: scale.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.onsets.is_empty() && self.clouds.is_empty() && self.labels.is_empty()
    }
}

fn cell_time(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64().filter(|t| t.is_finite()),
        Value::String(s) => parse_time_input(s).ok().map(|t| to_unix(&t) as f64),
        _ => None,
    }
}

/// Onsets and magnetic clouds from row-major event table data.
///
/// Every row with a time is an onset. Rows with both a cloud start and a
/// duration (hours) also give a cloud. Missing fields give no overlays.
pub fn events_overlays(fields: &[String], rows: &[Vec<Value>]) -> (Vec<Onset>, Vec<MagneticCloud>) {
    let index = |name: &str| fields.iter().position(|f| f == name);
    let cell = |row: &'_ [Value], idx: Option<usize>| idx.and_then(|i| row.get(i)).cloned();
    let (time_idx, type_idx) = (index(ONSET_TIME_FIELD), index(ONSET_TYPE_FIELD));
    let (cloud_idx, duration_idx) = (index(CLOUD_TIME_FIELD), index(CLOUD_DURATION_FIELD));

    let mut onsets = Vec::new();
    let mut clouds = Vec::new();
    for row in rows {
        if let Some(time) = cell(row, time_idx).as_ref().and_then(cell_time) {
            let kind = cell(row, type_idx).and_then(|v| v.as_str().map(str::to_string));
            onsets.push(Onset::new(time, kind, false));
        }
        let start = cell(row, cloud_idx).as_ref().and_then(cell_time);
        let hours = cell(row, duration_idx).and_then(|v| v.as_f64());
        if let (Some(start), Some(hours)) = (start, hours) {
            clouds.push(MagneticCloud::from_duration(start, hours));
        }
    }
    (onsets, clouds)
}
