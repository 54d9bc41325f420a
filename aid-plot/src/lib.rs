//! Plot building blocks for the space-weather charts.
//!
//! - `options`: serializable chart options for the circles and solar-wind plots
//! - `axis`: tick placement and labels
//! - `quadtree`: hit-testing for hovered scatter points
//! - `gesture`: click versus drag, and the base-day band
//! - `interaction`: per-render hover and pointer state of the circles plot
//! - `overlays`: onset markers and magnetic cloud bands

pub mod axis;
pub mod gesture;
pub mod interaction;
pub mod options;
pub mod overlays;
pub mod quadtree;

pub use interaction::{CirclesCallbacks, CirclesHover, CirclesInteraction};
pub use options::{circles_chart, solar_wind_options, ChartOptions, Size, SolarWindParams};
