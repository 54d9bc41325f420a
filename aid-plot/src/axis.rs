//! Axis tick placement and labelling.

use aid_utils::dates::{format_day_hour, from_unix, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};

/// Horizontal pixels reserved per time label.
pub const TIME_LABEL_WIDTH_PX: f64 = 76.0;

/// Candidate split widths, hours. Anything wider uses [`FALLBACK_SPLIT_HOURS`].
const SPLIT_HOURS: [i64; 4] = [4, 6, 12, 24];
const FALLBACK_SPLIT_HOURS: i64 = 48;

/// How an axis turns tick values into labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    /// Leave it to the charting library.
    Default,
    /// `DD'HH` of a unix time.
    DayHour,
    /// Rounded to whole numbers.
    Integer,
    /// Date at midnight splits only, year on the first day.
    DaySplits,
    /// `10ⁿ` at exact powers of ten, blank elsewhere.
    LogExponent,
}

impl TickFormat {
    /// Labels for `values`; `None` means "no label at this tick".
    pub fn labels(&self, values: &[f64]) -> Vec<Option<String>> {
        match self {
            TickFormat::Default => values.iter().map(|v| Some(v.to_string())).collect(),
            TickFormat::DayHour => values.iter().map(|v| Some(format_day_hour(*v))).collect(),
            TickFormat::Integer => values.iter().map(|v| Some(format!("{:.0}", v))).collect(),
            TickFormat::DaySplits => day_split_labels(values),
            TickFormat::LogExponent => values.iter().map(|v| Some(log_exponent_label(*v))).collect(),
        }
    }
}

/// Split positions for a time axis `width_px` wide spanning `[min, max]` seconds.
///
/// The split width is the smallest of 4, 6, 12 or 24 hours that keeps labels
/// at least [`TIME_LABEL_WIDTH_PX`] apart (48 hours otherwise). Splits start
/// at the first multiple of the split width and stop a quarter split short
/// of `max`.
pub fn time_splits(width_px: f64, min: f64, max: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min {
        return Vec::new();
    }
    let slots = (width_px / TIME_LABEL_WIDTH_PX).floor().max(1.0);
    let slot_width = ((max - min) / slots).ceil();
    let hours = SPLIT_HOURS
        .iter()
        .copied()
        .find(|h| slot_width <= (h * SECONDS_PER_HOUR) as f64)
        .unwrap_or(FALLBACK_SPLIT_HOURS);
    let split = (hours * SECONDS_PER_HOUR) as f64;
    let start = (min / split).ceil() * split;
    let limit = ((max - split / 4.0 - start) / split).ceil().max(0.0) as usize;
    (0..limit).map(|i| start + i as f64 * split).collect()
}

/// Labels for [`time_splits`]: `YYYY-MM-DD` for the first day, `     MM-DD`
/// for later midnights, nothing for splits inside a day.
pub fn day_split_labels(splits: &[f64]) -> Vec<Option<String>> {
    let first = splits.first().copied().unwrap_or_default();
    splits
        .iter()
        .map(|&v| {
            if v.rem_euclid(SECONDS_PER_DAY as f64) != 0.0 {
                return None;
            }
            let day = from_unix(v)?;
            let prefix = if v - first < SECONDS_PER_DAY as f64 {
                day.format("%Y-").to_string()
            } else {
                "     ".to_string()
            };
            Some(format!("{}{}", prefix, day.format("%m-%d")))
        })
        .collect()
}

/// `10ⁿ` for exact powers of ten, empty otherwise.
pub fn log_exponent_label(value: f64) -> String {
    if !(value.is_finite() && value > 0.0) {
        return String::new();
    }
    let exponent = value.log10();
    let rounded = exponent.round();
    if (exponent - rounded).abs() > 1e-9 {
        return String::new();
    }
    format!("10{}", superscript(rounded as i32))
}

/// Unicode superscript digits for an integer.
pub fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            '-' => '⁻',
            other => other,
        })
        .collect()
}
