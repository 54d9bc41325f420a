//! Data processing for the space-weather plots.
//!
//! This crate turns API response bodies into the column buffers the charting
//! library consumes.

pub mod circles;

/// Numeric series extracted from columnar JSON.
pub mod series {
    use serde_json::Value;

    /// Convert a JSON column to `Option<f64>`; anything non-numeric is a gap.
    pub fn numeric_column(column: &[Value]) -> Vec<Option<f64>> {
        column
            .iter()
            .map(|v| v.as_f64().filter(|x| x.is_finite()))
            .collect()
    }

    /// Columnar line plot data: the first column is time, the rest are series.
    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    pub struct LineData {
        pub time: Vec<f64>,
        pub series: Vec<Vec<Option<f64>>>,
    }

    impl LineData {
        /// Build from selected columns (`[time, series...]`).
        ///
        /// Rows whose time is not numeric are dropped from every column.
        pub fn from_columns(columns: &[Vec<Value>]) -> Option<Self> {
            let (time_col, rest) = columns.split_first()?;
            let times = numeric_column(time_col);
            let keep: Vec<usize> = times
                .iter()
                .enumerate()
                .filter_map(|(i, t)| t.map(|_| i))
                .collect();
            if keep.is_empty() {
                return None;
            }
            let time = keep.iter().filter_map(|&i| times[i]).collect();
            let series = rest
                .iter()
                .map(|col| {
                    let values = numeric_column(col);
                    keep.iter()
                        .map(|&i| values.get(i).copied().flatten())
                        .collect()
                })
                .collect();
            Some(Self { time, series })
        }

        pub fn len(&self) -> usize {
            self.time.len()
        }

        pub fn is_empty(&self) -> bool {
            self.time.is_empty()
        }
    }

}

/// Index lookup on sorted time axes.
pub mod nearest {
    /// Index of the value in `sorted` closest to `target`.
    ///
    /// Ties go to the earlier index. `None` for an empty slice or a NaN target.
    pub fn nearest_index(sorted: &[f64], target: f64) -> Option<usize> {
        if sorted.is_empty() || target.is_nan() {
            return None;
        }
        let upper = sorted.partition_point(|v| *v < target);
        if upper == 0 {
            return Some(0);
        }
        if upper == sorted.len() {
            return Some(sorted.len() - 1);
        }
        let below = target - sorted[upper - 1];
        let above = sorted[upper] - target;
        Some(if above < below { upper } else { upper - 1 })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_nearest_index() {
            let times = [0.0, 10.0, 20.0, 30.0];
            assert_eq!(nearest_index(&times, -5.0), Some(0));
            assert_eq!(nearest_index(&times, 4.0), Some(0));
            assert_eq!(nearest_index(&times, 5.0), Some(0));
            assert_eq!(nearest_index(&times, 6.0), Some(1));
            assert_eq!(nearest_index(&times, 20.0), Some(2));
            assert_eq!(nearest_index(&times, 99.0), Some(3));
        }

        #[test]
        fn test_nearest_index_degenerate() {
            assert_eq!(nearest_index(&[], 1.0), None);
            assert_eq!(nearest_index(&[1.0], f64::NAN), None);
        }
    }
}
