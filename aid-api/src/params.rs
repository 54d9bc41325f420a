//! Query parameters for API requests.
//!
//! Every endpoint takes a `from`/`to` interval in unix seconds. The circles
//! endpoint adds optional tuning knobs; unset or zero-valued knobs are left
//! out of the query so the server applies its own defaults.

use aid_utils::dates::to_unix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed time interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// `from` and `to` query pairs in whole unix seconds.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", to_unix(&self.from).to_string()),
            ("to", to_unix(&self.to).to_string()),
        ]
    }

    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        self.from <= *time && *time <= self.to
    }
}

/// Parameters of a ring-of-stations request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclesParams {
    pub interval: TimeInterval,
    /// Start of the reference (base) day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<DateTime<Utc>>,
    /// Station codes to leave out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Precursor index window, hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<u32>,
    /// Minimum variation amplitude, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minamp: Option<f64>,
}

impl CirclesParams {
    pub fn new(interval: TimeInterval) -> Self {
        Self {
            interval,
            base: None,
            exclude: None,
            window: None,
            minamp: None,
        }
    }

    pub fn with_base(mut self, base: DateTime<Utc>) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_exclude(mut self, stations: Vec<String>) -> Self {
        self.exclude = Some(stations);
        self
    }

    pub fn with_window(mut self, hours: u32) -> Self {
        self.window = Some(hours);
        self
    }

    pub fn with_minamp(mut self, percent: f64) -> Self {
        self.minamp = Some(percent);
        self
    }

    /// Query pairs in the order the server documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.interval.query_pairs();
        if let Some(exclude) = self.exclude.as_ref().filter(|e| !e.is_empty()) {
            pairs.push(("exclude", exclude.join(",")));
        }
        if let Some(window) = self.window.filter(|w| *w != 0) {
            pairs.push(("window", window.to_string()));
        }
        if let Some(minamp) = self.minamp.filter(|m| *m != 0.0 && m.is_finite()) {
            pairs.push(("minamp", minamp.to_string()));
        }
        if let Some(base) = &self.base {
            pairs.push(("base", to_unix(base).to_string()));
        }
        pairs
    }

    /// Cache key identifying this request; equal params give equal keys.
    pub fn query_key(&self) -> String {
        format!("ros{}", serde_json::to_string(self).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn december() -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2021, 12, 6, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 12, 12, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_interval_only() {
        let pairs = CirclesParams::new(december()).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("from", "1638748800".to_string()),
                ("to", "1639267200".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_optionals_present() {
        let params = CirclesParams::new(december())
            .with_exclude(vec!["APTY".to_string(), "NRLK".to_string()])
            .with_window(3)
            .with_minamp(0.5)
            .with_base(Utc.with_ymd_and_hms(2021, 12, 8, 0, 0, 0).unwrap());
        let pairs = params.query_pairs();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[2], ("exclude", "APTY,NRLK".to_string()));
        assert_eq!(pairs[3], ("window", "3".to_string()));
        assert_eq!(pairs[4], ("minamp", "0.5".to_string()));
        assert_eq!(pairs[5], ("base", "1638921600".to_string()));
    }

    #[test]
    fn test_empty_and_zero_optionals_are_omitted() {
        let params = CirclesParams::new(december())
            .with_exclude(Vec::new())
            .with_window(0)
            .with_minamp(0.0);
        assert_eq!(params.query_pairs().len(), 2);
    }

    #[test]
    fn test_query_key_tracks_params() {
        let a = CirclesParams::new(december());
        let b = CirclesParams::new(december());
        let c = CirclesParams::new(december()).with_window(2);
        assert_eq!(a.query_key(), b.query_key());
        assert_ne!(a.query_key(), c.query_key());
        assert!(a.query_key().starts_with("ros"));
    }
}
