//! Shared Dioxus components and uPlot bridge for the space-weather apps.
//!
//! This crate provides:
//! - `js_bridge`: chart shim scripts evaluated via `js_sys::eval()` and typed render calls
//! - `hooks`: Rust closures the shim calls for tick labels, hit-testing and gestures
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: reusable RSX components (interval picker, status, filters, table)

pub mod components;
pub mod hooks;
pub mod js_bridge;
pub mod state;
