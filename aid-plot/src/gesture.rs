//! Pointer gestures on the circles plot: click versus drag, and the base-day band.

use aid_utils::dates::{snap_to_hour, SECONDS_PER_DAY};
use serde::Serialize;

/// Total pointer travel, CSS pixels, below which a press-release is a click.
pub const CLICK_THRESHOLD_PX: f64 = 30.0;

/// Linear mapping between a value axis and plot-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    /// Plot area extent in pixels.
    pub pixels: f64,
}

impl LinearScale {
    pub fn new(min: f64, max: f64, pixels: f64) -> Self {
        Self { min, max, pixels }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn val_to_pos(&self, value: f64) -> f64 {
        if self.span() == 0.0 {
            return 0.0;
        }
        (value - self.min) / self.span() * self.pixels
    }

    pub fn pos_to_val(&self, pos: f64) -> f64 {
        if self.pixels == 0.0 {
            return self.min;
        }
        self.min + pos / self.pixels * self.span()
    }

    /// Value units per pixel.
    pub fn units_per_px(&self) -> f64 {
        if self.pixels == 0.0 {
            0.0
        } else {
            self.span() / self.pixels
        }
    }
}

/// What a completed press-release turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Click { x: f64, y: f64 },
    Drag { dx: f64, dy: f64 },
}

/// A press in progress, accumulating path length as the pointer moves.
///
/// Coordinates may be device pixels; `pixel_ratio` converts the travel back
/// to CSS pixels before it is compared with [`CLICK_THRESHOLD_PX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGesture {
    start: (f64, f64),
    last: (f64, f64),
    travel: f64,
    pixel_ratio: f64,
}

impl PointerGesture {
    pub fn start(x: f64, y: f64) -> Self {
        Self {
            start: (x, y),
            last: (x, y),
            travel: 0.0,
            pixel_ratio: 1.0,
        }
    }

    /// Device pixels per CSS pixel. Non-positive ratios are ignored.
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.travel += (x - self.last.0).hypot(y - self.last.1);
        self.last = (x, y);
    }

    /// Path length so far, in the units of the coordinates.
    pub fn travel(&self) -> f64 {
        self.travel
    }

    /// Release at `(x, y)`. Drag deltas stay in coordinate units.
    pub fn finish(mut self, x: f64, y: f64) -> Gesture {
        self.move_to(x, y);
        if self.travel / self.pixel_ratio < CLICK_THRESHOLD_PX {
            Gesture::Click { x, y }
        } else {
            Gesture::Drag {
                dx: x - self.start.0,
                dy: y - self.start.1,
            }
        }
    }
}

/// The reference day used to compute variations: exactly 24 hours wide,
/// always starting on a whole hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseDayBand {
    start: i64,
}

impl BaseDayBand {
    pub fn new(start: f64) -> Self {
        Self {
            start: snap_to_hour(start),
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.start + SECONDS_PER_DAY
    }

    /// The band after a horizontal drag of `dx` pixels on `scale`.
    pub fn dragged(&self, dx: f64, scale: &LinearScale) -> Self {
        Self::new(self.start as f64 + dx * scale.units_per_px())
    }

    /// Left edge and width of the band in plot pixels.
    pub fn pixel_span(&self, scale: &LinearScale) -> (f64, f64) {
        let left = scale.val_to_pos(self.start as f64);
        let right = scale.val_to_pos(self.end() as f64);
        (left, right - left)
    }
}
