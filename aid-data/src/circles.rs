//! Ring-of-stations reshaping.
//!
//! The API returns a row-major `time x station` grid. The scatter plot wants
//! flat column buffers, one per sign, where each point carries its time,
//! asymptotic longitude angle, value and station index.

use aid_api::circles::CirclesResponse;
use log::{info, warn};
use serde::Serialize;

/// Fewer distinct timestamps than this is "insufficient data".
pub const MIN_TIMESTAMPS: usize = 10;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Asymptotic longitude of a station at `time`, degrees in `[0, 360)`.
///
/// The time is reduced modulo one day before scaling, so the result is exactly
/// periodic in whole days for integer unix seconds.
pub fn longitude_angle(time: f64, shift: f64) -> f64 {
    let day_fraction = time.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_DAY;
    let angle = (day_fraction * 360.0 + shift).rem_euclid(360.0);
    // rem_euclid may round up to the modulus itself
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Four parallel columns describing plotted points.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlotBuffer {
    pub time: Vec<f64>,
    pub angle: Vec<f64>,
    pub value: Vec<f64>,
    pub station_index: Vec<usize>,
}

impl PlotBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            angle: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
            station_index: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, time: f64, angle: f64, value: f64, station_index: usize) {
        self.time.push(time);
        self.angle.push(angle);
        self.value.push(value);
        self.station_index.push(station_index);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// True when all four columns have the same length.
    pub fn is_consistent(&self) -> bool {
        let n = self.time.len();
        self.angle.len() == n && self.value.len() == n && self.station_index.len() == n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignCounts {
    pub positive: usize,
    pub negative: usize,
    pub null: usize,
}

impl SignCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.null
    }
}

/// Bucket of a single grid value. Non-finite values count as null.
fn classify(value: Option<f64>) -> Option<bool> {
    match value {
        Some(v) if v.is_finite() => Some(v >= 0.0),
        _ => None,
    }
}

/// Count positive, negative and null cells of a variation grid.
pub fn count_signs(variation: &[Vec<Option<f64>>]) -> SignCounts {
    let mut counts = SignCounts::default();
    for value in variation.iter().flatten() {
        match classify(*value) {
            Some(true) => counts.positive += 1,
            Some(false) => counts.negative += 1,
            None => counts.null += 1,
        }
    }
    counts
}

/// Everything the circles plot needs, ready to serialize for the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirclesData {
    pub positive: PlotBuffer,
    pub negative: PlotBuffer,
    /// Precursor index `(time, value)`, plotted on its own scale.
    pub precursor_idx: (Vec<f64>, Vec<Option<f64>>),
    pub stations: Vec<String>,
    pub base: Option<f64>,
    #[serde(skip)]
    pub counts: SignCounts,
}

impl CirclesData {
    /// Station code for a point's station index.
    pub fn station(&self, index: usize) -> Option<&str> {
        self.stations.get(index).map(String::as_str)
    }
}

/// Split a response into positive and negative point buffers.
///
/// Returns `None` for malformed grids and for fewer than [`MIN_TIMESTAMPS`]
/// distinct timestamps; the caller shows an empty state for both. Points keep
/// their grid order (time-major, then station) within each bucket, and every
/// buffer is allocated once at its exact final size.
///
/// ```
/// use aid_api::circles::CirclesResponse;
/// use aid_data::circles::reshape;
///
/// let resp = CirclesResponse {
///     base: None,
///     time: (0..10).map(|i| i as f64 * 3600.0).collect(),
///     variation: (0..10).map(|i| vec![Some(i as f64 - 4.5), None]).collect(),
///     shift: vec![0.0, 90.0],
///     station: vec!["APTY".into(), "NRLK".into()],
///     precursor_idx: (vec![], vec![]),
///     filtered: 0,
///     excluded: vec![],
/// };
/// let data = reshape(&resp).unwrap();
/// assert_eq!(data.positive.len(), 5);
/// assert_eq!(data.negative.len(), 5);
/// assert_eq!(data.counts.null, 10);
/// ```
pub fn reshape(resp: &CirclesResponse) -> Option<CirclesData> {
    if let Err(e) = resp.check_shape() {
        warn!("[AID] circles: {}", e);
        return None;
    }
    let distinct = resp.distinct_times();
    if distinct < MIN_TIMESTAMPS {
        info!(
            "[AID] circles: insufficient data ({} distinct timestamps)",
            distinct
        );
        return None;
    }

    let counts = count_signs(&resp.variation);
    let mut positive = PlotBuffer::with_capacity(counts.positive);
    let mut negative = PlotBuffer::with_capacity(counts.negative);

    for (&time, row) in resp.time.iter().zip(&resp.variation) {
        for (si, (&value, &shift)) in row.iter().zip(&resp.shift).enumerate() {
            let Some(v) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let bucket = if v >= 0.0 { &mut positive } else { &mut negative };
            bucket.push(time, longitude_angle(time, shift), v, si);
        }
    }

    info!(
        "[AID] circles: {} positive, {} negative, {} null points",
        counts.positive, counts.negative, counts.null
    );
    Some(CirclesData {
        positive,
        negative,
        precursor_idx: resp.precursor_idx.clone(),
        stations: resp.station.clone(),
        base: resp.base,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn response(time: Vec<f64>, variation: Vec<Vec<Option<f64>>>, shift: Vec<f64>) -> CirclesResponse {
        let station = (0..shift.len()).map(|i| format!("S{i}")).collect();
        CirclesResponse {
            base: None,
            time,
            variation,
            shift,
            station,
            precursor_idx: (Vec::new(), Vec::new()),
            filtered: 0,
            excluded: Vec::new(),
        }
    }

    fn hourly(n: usize) -> Vec<f64> {
        (0..n).map(|i| 1_638_748_800.0 + i as f64 * 3600.0).collect()
    }

    #[test]
    fn test_angle_formula() {
        // Midnight: angle is the shift itself
        assert_relative_eq!(longitude_angle(1_638_748_800.0, 45.0), 45.0);
        // Six hours later: a quarter turn
        assert_relative_eq!(longitude_angle(1_638_748_800.0 + 21600.0, 45.0), 135.0);
        // Wraps past 360
        assert_relative_eq!(longitude_angle(1_638_748_800.0 + 64800.0, 100.0), 10.0);
        // Negative shifts wrap into range
        assert_relative_eq!(longitude_angle(1_638_748_800.0, -30.0), 330.0);
    }

    #[test]
    fn test_insufficient_timestamps() {
        let resp = response(hourly(9), vec![vec![Some(1.0)]; 9], vec![0.0]);
        assert!(reshape(&resp).is_none());
    }

    #[test]
    fn test_duplicate_timestamps_are_not_distinct() {
        let mut time = hourly(9);
        time.push(time[0]);
        let resp = response(time, vec![vec![Some(1.0)]; 10], vec![0.0]);
        assert!(reshape(&resp).is_none());
    }

    #[test]
    fn test_malformed_grid_is_no_data() {
        let mut variation = vec![vec![Some(1.0), Some(2.0)]; 12];
        variation[3] = vec![Some(1.0)];
        let resp = response(hourly(12), variation, vec![0.0, 10.0]);
        assert!(reshape(&resp).is_none());
    }

    #[test]
    fn test_partition_is_stable_and_exact() {
        let variation: Vec<Vec<Option<f64>>> = (0..10)
            .map(|i| vec![Some(i as f64 - 5.0), None, Some(-(i as f64) - 0.5)])
            .collect();
        let resp = response(hourly(10), variation, vec![0.0, 120.0, 240.0]);
        let data = reshape(&resp).unwrap();

        assert_eq!(data.counts.null, 10);
        assert_eq!(data.positive.len(), 5);
        assert_eq!(data.negative.len(), 15);
        assert_eq!(data.positive.time.capacity(), 5);
        assert_eq!(data.negative.value.capacity(), 15);

        // Grid order is preserved: values appear by time then station
        assert_eq!(data.positive.value, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(data.negative.value[..3], [-5.0, -0.5, -4.0]);
        assert_eq!(data.negative.station_index[..3], [0, 2, 0]);
        assert_eq!(data.station(2), Some("S2"));
    }

    #[test]
    fn test_zero_is_positive() {
        let resp = response(hourly(10), vec![vec![Some(0.0)]; 10], vec![0.0]);
        let data = reshape(&resp).unwrap();
        assert_eq!(data.positive.len(), 10);
        assert!(data.negative.is_empty());
    }

    proptest! {
        #[test]
        fn bucket_counts_cover_grid(
            grid in (10usize..40, 1usize..8).prop_flat_map(|(t, s)| {
                proptest::collection::vec(
                    proptest::collection::vec(proptest::option::of(-20.0f64..20.0), s),
                    t,
                )
            }),
        ) {
            let tlen = grid.len();
            let slen = grid[0].len();
            let shift = (0..slen).map(|i| i as f64 * 37.0).collect();
            let resp = response(hourly(tlen), grid, shift);
            let data = reshape(&resp).unwrap();

            prop_assert_eq!(data.counts.total(), tlen * slen);
            prop_assert_eq!(data.positive.len(), data.counts.positive);
            prop_assert_eq!(data.negative.len(), data.counts.negative);
            prop_assert!(data.positive.is_consistent());
            prop_assert!(data.negative.is_consistent());
            prop_assert!(data.positive.value.iter().all(|v| *v >= 0.0));
            prop_assert!(data.negative.value.iter().all(|v| *v < 0.0));
            prop_assert!(data.positive.angle.iter().chain(&data.negative.angle).all(|a| (0.0..360.0).contains(a)));
        }

        #[test]
        fn angle_is_periodic_in_days(
            time in 0i64..2_000_000_000,
            shift in -360.0f64..360.0,
            days in -1000i64..1000,
        ) {
            let shifted = time + 86400 * days;
            prop_assert_eq!(
                longitude_angle(time as f64, shift),
                longitude_angle(shifted as f64, shift)
            );
        }
    }
}
