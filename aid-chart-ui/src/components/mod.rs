//! Reusable Dioxus RSX components for the space-weather apps.

mod chart_container;
mod chart_header;
mod error_display;
mod filter_card;
mod filter_list;
mod interval_picker;
mod load_status;
mod loading_spinner;
mod table_view;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use filter_card::FilterCard;
pub use filter_list::FilterList;
pub use interval_picker::IntervalPicker;
pub use load_status::{LoadStatus, StatusMessage};
pub use loading_spinner::LoadingSpinner;
pub use table_view::TableView;
