//! Per-render interaction state of the circles plot.
//!
//! The chart shim calls into this from its draw and cursor hooks: the
//! draw-clear hook resets the quadtree, the point renderer registers every
//! circle it draws, and cursor movement resolves the hovered point. Pointer
//! presses become either a click (select the nearest time) or a drag of the
//! base-day band.

use crate::gesture::{BaseDayBand, Gesture, LinearScale, PointerGesture};
use crate::quadtree::{HitRect, Quadtree};
use aid_data::circles::{CirclesData, PlotBuffer};
use aid_data::nearest::nearest_index;
use aid_utils::dates::{floor_to_day, format_date_time, from_unix};
use log::debug;
use std::rc::Rc;

/// Plot series carrying positive variations.
pub const POSITIVE_SERIES: usize = 1;
/// Plot series carrying negative variations.
pub const NEGATIVE_SERIES: usize = 2;

/// Quadtree plus the last hovered rectangle. Rebuilt on every redraw.
#[derive(Debug, Clone)]
pub struct CirclesHover {
    tree: Quadtree,
    hovered: Option<HitRect>,
}

impl CirclesHover {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            tree: Quadtree::new(0.0, 0.0, width, height),
            hovered: None,
        }
    }

    /// Start a redraw over a plot area of the given size.
    pub fn reset(&mut self, width: f64, height: f64) {
        self.tree.reset(0.0, 0.0, width, height);
        self.hovered = None;
    }

    pub fn add(&mut self, rect: HitRect) {
        self.tree.add(rect);
    }

    /// Resolve the cursor. Nothing under it clears the hovered point.
    pub fn hover(&mut self, x: f64, y: f64) -> Option<HitRect> {
        self.hovered = self.tree.hover(x, y).copied();
        self.hovered
    }

    pub fn hovered(&self) -> Option<HitRect> {
        self.hovered
    }

    /// Data index the cursor reports for `series`.
    pub fn data_index(&self, series: usize) -> usize {
        match self.hovered {
            Some(r) if r.series == series => r.index,
            _ => 0,
        }
    }

    /// Diameter of the cursor point for `series`; zero hides it.
    pub fn point_size(&self, series: usize) -> f64 {
        match self.hovered {
            Some(r) if r.series == series => r.w,
            _ => 0.0,
        }
    }

    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }
}

/// Caller hooks fired by completed gestures.
#[derive(Default)]
pub struct CirclesCallbacks {
    /// Receives the x-axis time nearest to the click, unix seconds.
    pub on_click: Option<Box<dyn FnMut(f64)>>,
    /// Receives the new base time, unix seconds on a whole hour.
    pub on_base_change: Option<Box<dyn FnMut(i64)>>,
}

impl std::fmt::Debug for CirclesCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CirclesCallbacks")
            .field("on_click", &self.on_click.is_some())
            .field("on_base_change", &self.on_base_change.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct CirclesInteraction {
    data: Rc<CirclesData>,
    hover: CirclesHover,
    scale: LinearScale,
    times: Vec<f64>,
    band: Option<BaseDayBand>,
    gesture: Option<PointerGesture>,
    pixel_ratio: f64,
    callbacks: CirclesCallbacks,
}

impl CirclesInteraction {
    pub fn new(data: Rc<CirclesData>, callbacks: CirclesCallbacks) -> Self {
        let times = x_times(&data);
        let band = data
            .base
            .or_else(|| times.first().map(|t| floor_to_day(*t as i64) as f64))
            .map(BaseDayBand::new);
        let scale = match (times.first(), times.last()) {
            (Some(min), Some(max)) => LinearScale::new(*min, *max, 0.0),
            _ => LinearScale::new(0.0, 0.0, 0.0),
        };
        Self {
            data,
            hover: CirclesHover::new(0.0, 0.0),
            scale,
            times,
            band,
            gesture: None,
            pixel_ratio: 1.0,
            callbacks,
        }
    }

    /// Draw-clear hook: new plot area and x range, empty quadtree.
    pub fn draw_clear(&mut self, width: f64, height: f64, x_min: f64, x_max: f64) {
        self.hover.reset(width, height);
        self.scale = LinearScale::new(x_min, x_max, width);
    }

    /// Register a drawn point's bounding box.
    pub fn add_rect(&mut self, rect: HitRect) {
        self.hover.add(rect);
    }

    pub fn hover(&mut self, x: f64, y: f64) -> Option<HitRect> {
        self.hover.hover(x, y)
    }

    /// Device pixels per CSS pixel of the coordinates passed in.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    /// Sorted, distinct x-axis times a click can select.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn hover_state(&self) -> &CirclesHover {
        &self.hover
    }

    /// Legend text for the hovered point, empty when nothing is hovered.
    pub fn legend_text(&self) -> String {
        let Some(rect) = self.hover.hovered() else {
            return String::new();
        };
        legend_text(&self.data, rect.series, rect.index).unwrap_or_default()
    }

    pub fn band(&self) -> Option<BaseDayBand> {
        self.band
    }

    /// Base-day band in plot pixels, `(left, width)`.
    pub fn band_span(&self) -> Option<(f64, f64)> {
        self.band.map(|b| b.pixel_span(&self.scale))
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gesture = Some(PointerGesture::start(x, y).with_pixel_ratio(self.pixel_ratio));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(g) = self.gesture.as_mut() {
            g.move_to(x, y);
        }
    }

    /// Finish a press. Fires `on_click` or `on_base_change` accordingly.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<Gesture> {
        let outcome = self.gesture.take()?.finish(x, y);
        match outcome {
            Gesture::Click { x, .. } => {
                let value = self.scale.pos_to_val(x);
                if let Some(time) = nearest_index(&self.times, value).and_then(|i| self.times.get(i).copied()) {
                    debug!("[AID] circles: click at {} -> {}", value, time);
                    if let Some(cb) = self.callbacks.on_click.as_mut() {
                        cb(time);
                    }
                }
            }
            Gesture::Drag { dx, .. } => {
                if let Some(band) = self.band {
                    let moved = band.dragged(dx, &self.scale);
                    self.band = Some(moved);
                    debug!("[AID] circles: base moved to {}", moved.start());
                    if let Some(cb) = self.callbacks.on_base_change.as_mut() {
                        cb(moved.start());
                    }
                }
            }
        }
        Some(outcome)
    }
}

/// Sorted x-axis times: the precursor index series when present, otherwise
/// the distinct point times.
fn x_times(data: &CirclesData) -> Vec<f64> {
    let mut times: Vec<f64> = if data.precursor_idx.0.is_empty() {
        data.positive
            .time
            .iter()
            .chain(&data.negative.time)
            .copied()
            .collect()
    } else {
        data.precursor_idx.0.clone()
    };
    times.retain(|t| t.is_finite());
    times.sort_by(f64::total_cmp);
    times.dedup();
    times
}

/// `[ STATION ] v = X.XX%, aLon = Y.YY, time = YYYY-MM-DD HH:MM:SS`
pub fn legend_text(data: &CirclesData, series: usize, index: usize) -> Option<String> {
    let buffer: &PlotBuffer = match series {
        POSITIVE_SERIES => &data.positive,
        NEGATIVE_SERIES => &data.negative,
        _ => return None,
    };
    let station = data.station(*buffer.station_index.get(index)?)?;
    let value = buffer.value.get(index)?;
    let angle = buffer.angle.get(index)?;
    let time = from_unix(*buffer.time.get(index)?)?;
    Some(format!(
        "[ {} ] v = {:.2}%, aLon = {:.2}, time = {}",
        station,
        value,
        angle,
        format_date_time(&time)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aid_data::circles::SignCounts;
    use std::cell::RefCell;

    const DEC_6: f64 = 1_638_748_800.0;

    fn sample() -> Rc<CirclesData> {
        let positive = PlotBuffer {
            time: vec![DEC_6 + 3600.0],
            angle: vec![15.0],
            value: vec![1.234],
            station_index: vec![1],
        };
        let negative = PlotBuffer {
            time: vec![DEC_6 + 7200.0],
            angle: vec![300.5],
            value: vec![-0.5],
            station_index: vec![0],
        };
        let times: Vec<f64> = (0..=24).map(|h| DEC_6 + h as f64 * 3600.0).collect();
        Rc::new(CirclesData {
            positive,
            negative,
            precursor_idx: (times.clone(), vec![Some(1.0); times.len()]),
            stations: vec!["APTY".into(), "NRLK".into()],
            base: Some(DEC_6),
            counts: SignCounts::default(),
        })
    }

    #[test]
    fn test_legend_format() {
        let data = sample();
        assert_eq!(
            legend_text(&data, POSITIVE_SERIES, 0).unwrap(),
            "[ NRLK ] v = 1.23%, aLon = 15.00, time = 2021-12-06 01:00:00"
        );
        assert_eq!(
            legend_text(&data, NEGATIVE_SERIES, 0).unwrap(),
            "[ APTY ] v = -0.50%, aLon = 300.50, time = 2021-12-06 02:00:00"
        );
        assert!(legend_text(&data, 3, 0).is_none());
        assert!(legend_text(&data, POSITIVE_SERIES, 5).is_none());
    }

    #[test]
    fn test_hover_resolves_and_clears() {
        let mut ia = CirclesInteraction::new(sample(), CirclesCallbacks::default());
        ia.draw_clear(240.0, 100.0, DEC_6, DEC_6 + 86400.0);
        ia.add_rect(HitRect::new(10.0, 10.0, 6.0, 6.0, POSITIVE_SERIES, 0));

        assert!(ia.hover(12.0, 12.0).is_some());
        assert_eq!(ia.hover_state().data_index(POSITIVE_SERIES), 0);
        assert_eq!(ia.hover_state().point_size(POSITIVE_SERIES), 6.0);
        assert_eq!(ia.hover_state().point_size(NEGATIVE_SERIES), 0.0);
        assert!(ia.legend_text().starts_with("[ NRLK ]"));

        assert!(ia.hover(100.0, 90.0).is_none());
        assert_eq!(ia.legend_text(), "");
    }

    #[test]
    fn test_redraw_resets_tree() {
        let mut ia = CirclesInteraction::new(sample(), CirclesCallbacks::default());
        ia.draw_clear(240.0, 100.0, DEC_6, DEC_6 + 86400.0);
        ia.add_rect(HitRect::new(10.0, 10.0, 6.0, 6.0, POSITIVE_SERIES, 0));
        ia.hover(12.0, 12.0);
        ia.draw_clear(240.0, 100.0, DEC_6, DEC_6 + 86400.0);
        assert!(ia.hover_state().tree().is_empty());
        assert!(ia.hover_state().hovered().is_none());
    }

    #[test]
    fn test_click_reports_nearest_time() {
        let clicked = Rc::new(RefCell::new(None));
        let sink = clicked.clone();
        let callbacks = CirclesCallbacks {
            on_click: Some(Box::new(move |i| *sink.borrow_mut() = Some(i))),
            on_base_change: None,
        };
        let mut ia = CirclesInteraction::new(sample(), callbacks);
        // One hour per 10px
        ia.draw_clear(240.0, 100.0, DEC_6, DEC_6 + 86400.0);
        ia.pointer_down(52.0, 50.0);
        ia.pointer_move(55.0, 50.0);
        let outcome = ia.pointer_up(54.0, 50.0);
        assert!(matches!(outcome, Some(Gesture::Click { .. })));
        assert_eq!(*clicked.borrow(), Some(DEC_6 + 5.0 * 3600.0));
    }

    #[test]
    fn test_click_without_precursor_index_uses_point_times() {
        let mut data = (*sample()).clone();
        data.precursor_idx = (Vec::new(), Vec::new());
        let clicked = Rc::new(RefCell::new(None));
        let sink = clicked.clone();
        let callbacks = CirclesCallbacks {
            on_click: Some(Box::new(move |t| *sink.borrow_mut() = Some(t))),
            on_base_change: None,
        };
        let mut ia = CirclesInteraction::new(Rc::new(data), callbacks);
        assert_eq!(ia.times(), &[DEC_6 + 3600.0, DEC_6 + 7200.0]);
        ia.draw_clear(1000.0, 500.0, DEC_6, DEC_6 + 86400.0);
        // +2h on a 1000px day
        let x = 1000.0 * 2.0 / 24.0;
        ia.pointer_down(x, 100.0);
        ia.pointer_up(x, 100.0);
        assert_eq!(*clicked.borrow(), Some(DEC_6 + 7200.0));
    }

    #[test]
    fn test_click_threshold_follows_pixel_ratio() {
        let clicked = Rc::new(RefCell::new(None));
        let sink = clicked.clone();
        let callbacks = CirclesCallbacks {
            on_click: Some(Box::new(move |t| *sink.borrow_mut() = Some(t))),
            on_base_change: None,
        };
        let mut ia = CirclesInteraction::new(sample(), callbacks);
        ia.draw_clear(480.0, 200.0, DEC_6, DEC_6 + 86400.0);
        ia.set_pixel_ratio(2.0);
        // 40 device px is 20 CSS px: still a click
        ia.pointer_down(100.0, 50.0);
        ia.pointer_move(140.0, 50.0);
        let outcome = ia.pointer_up(140.0, 50.0);
        assert!(matches!(outcome, Some(Gesture::Click { .. })));
        assert_eq!(*clicked.borrow(), Some(DEC_6 + 7.0 * 3600.0));
        assert_eq!(ia.band().map(|b| b.start()), Some(DEC_6 as i64));
    }

    #[test]
    fn test_drag_moves_band_by_whole_hours() {
        let base = Rc::new(RefCell::new(None));
        let sink = base.clone();
        let callbacks = CirclesCallbacks {
            on_click: None,
            on_base_change: Some(Box::new(move |b| *sink.borrow_mut() = Some(b))),
        };
        let mut ia = CirclesInteraction::new(sample(), callbacks);
        ia.draw_clear(240.0, 100.0, DEC_6, DEC_6 + 86400.0);
        ia.pointer_down(10.0, 50.0);
        ia.pointer_move(40.0, 50.0);
        ia.pointer_move(44.0, 50.0);
        let outcome = ia.pointer_up(44.0, 50.0);
        assert!(matches!(outcome, Some(Gesture::Drag { .. })));
        // 34px at 360 s/px = 12240s, nearest hour is 3h
        let expected = DEC_6 as i64 + 3 * 3600;
        assert_eq!(*base.borrow(), Some(expected));
        assert_eq!(ia.band().map(|b| b.start()), Some(expected));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut ia = CirclesInteraction::new(sample(), CirclesCallbacks::default());
        assert!(ia.pointer_up(1.0, 1.0).is_none());
    }
}
