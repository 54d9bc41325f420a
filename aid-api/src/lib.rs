//! Wire types and HTTP client for the space-weather data API.
//!
//! This crate provides:
//! - `config`: where the API lives (`AID_API_URL`)
//! - `params`: time intervals and query parameter builders
//! - `circles`, `columnar`, `tables_info`: response bodies as served by the API
//! - `client`: async `reqwest` client, behind the `api` feature

pub mod circles;
pub mod columnar;
pub mod config;
pub mod error;
pub mod params;
pub mod tables_info;

#[cfg(feature = "api")]
pub mod client;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use params::{CirclesParams, TimeInterval};

/// Ring-of-stations variation endpoint.
pub const CIRCLES_PATH: &str = "api/neutron/ros/";
/// Solar wind (OMNI) columnar endpoint.
pub const OMNI_PATH: &str = "api/omni/";
/// Events catalogue rows.
pub const EVENTS_PATH: &str = "api/events/";
/// Column descriptions for the events catalogue.
pub const EVENTS_INFO_PATH: &str = "api/events/info/";
