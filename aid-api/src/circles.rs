//! Ring-of-stations response body.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Per-station cosmic ray variation over a time grid.
///
/// `variation` is row-major: one row per `time` entry, one column per
/// `station`. Values are percent and may be null where a station has no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclesResponse {
    /// Base day start (unix seconds) the server actually used.
    #[serde(default)]
    pub base: Option<f64>,
    pub time: Vec<f64>,
    pub variation: Vec<Vec<Option<f64>>>,
    /// Asymptotic longitude shift per station, degrees.
    pub shift: Vec<f64>,
    pub station: Vec<String>,
    /// Precursor index as `(time, value)` columns.
    #[serde(rename = "precursor_idx", alias = "precursorIndex", default)]
    pub precursor_idx: (Vec<f64>, Vec<Option<f64>>),
    /// Number of stations dropped by the amplitude filter.
    #[serde(default)]
    pub filtered: usize,
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl CirclesResponse {
    /// Verify the grid dimensions agree with `time`, `station` and `shift`.
    pub fn check_shape(&self) -> Result<(), ApiError> {
        let stations = self.station.len();
        if self.shift.len() != stations {
            return Err(ApiError::Malformed(format!(
                "{} shifts for {} stations",
                self.shift.len(),
                stations
            )));
        }
        if self.variation.len() != self.time.len() {
            return Err(ApiError::Malformed(format!(
                "{} variation rows for {} timestamps",
                self.variation.len(),
                self.time.len()
            )));
        }
        if let Some((row, values)) = self
            .variation
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != stations)
        {
            return Err(ApiError::Malformed(format!(
                "variation row {} has {} values for {} stations",
                row,
                values.len(),
                stations
            )));
        }
        if self.precursor_idx.0.len() != self.precursor_idx.1.len() {
            return Err(ApiError::Malformed(
                "precursor index columns differ in length".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of distinct timestamps in the grid.
    pub fn distinct_times(&self) -> usize {
        let mut times: Vec<f64> = self.time.iter().copied().filter(|t| t.is_finite()).collect();
        times.sort_by(|a, b| a.total_cmp(b));
        times.dedup();
        times.len()
    }
}
