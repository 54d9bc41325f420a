//! Events table model: column catalogue, typed cells, filters and paging.
//!
//! Nothing here touches the DOM. The UI keeps a [`filter::FilterSet`] and a
//! [`view::TableWindow`] in signals and re-renders from them.

pub mod column;
pub mod filter;
pub mod value;
pub mod view;

pub use column::ColumnDef;
pub use filter::{Filter, FilterDraft, FilterError, FilterOp, FilterSet};
pub use value::{Row, Value};
pub use view::TableWindow;

#[cfg(test)]
pub(crate) mod fixtures {
    use aid_api::tables_info::TablesInfo;

    pub fn sample_info() -> TablesInfo {
        serde_json::from_str(
            r#"{
                "forbush_effects": {
                    "time": { "name": "time", "type": "time" },
                    "magnitude": { "name": "magnitude" },
                    "onset_type": { "name": "onset type", "type": "enum", "enum": ["SSC", "iSW", "SI"] },
                    "id": { "name": "id", "type": "integer", "hidden": true }
                },
                "solar_flares": {
                    "solar_flares_time": { "name": "time", "type": "time" },
                    "solar_flares_class": { "name": "class", "type": "text" }
                }
            }"#,
        )
        .unwrap()
    }
}
