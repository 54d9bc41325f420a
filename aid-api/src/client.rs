//! Async HTTP client for the data API.
//!
//! Built on `reqwest`, which uses the browser `fetch` on `wasm32` and hyper
//! natively, so the same client serves the WASM apps and native tooling.
//! Requests are never cancelled explicitly; dropping the future is enough.

use crate::circles::CirclesResponse;
use crate::columnar::ColumnarResponse;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::params::{CirclesParams, TimeInterval};
use crate::tables_info::TablesInfo;
use crate::{CIRCLES_PATH, EVENTS_INFO_PATH, EVENTS_PATH};
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `path` with `pairs` as query string and decode a JSON body.
    ///
    /// Anything but `200 OK` is an [`ApiError::Status`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.config.endpoint(path);
        let response = self.client.get(&url).query(pairs).send().await.map_err(|e| {
            warn!("[AID] request to {} failed: {}", url, e);
            ApiError::from(e)
        })?;
        if response.status() != StatusCode::OK {
            warn!("[AID] bad response status for {}: {}", url, response.status());
            return Err(ApiError::Status(response.status().as_u16()));
        }
        let body = response.json::<T>().await.map_err(|e| {
            warn!("[AID] failed to decode body from {}: {}", url, e);
            ApiError::from(e)
        })?;
        Ok(body)
    }

    /// Fetch the ring-of-stations variation grid.
    pub async fn fetch_circles(&self, params: &CirclesParams) -> ApiResult<CirclesResponse> {
        let resp: CirclesResponse = self.get_json(CIRCLES_PATH, &params.query_pairs()).await?;
        info!(
            "[AID] circles: {} timestamps x {} stations ({} filtered, {} excluded)",
            resp.time.len(),
            resp.station.len(),
            resp.filtered,
            resp.excluded.len()
        );
        Ok(resp)
    }

    /// Fetch a columnar endpoint and transpose `fields` into columns.
    ///
    /// `Ok(None)` means the server answered but had no rows for the interval.
    pub async fn fetch_columns(
        &self,
        path: &str,
        interval: &TimeInterval,
        fields: &[&str],
    ) -> ApiResult<Option<Vec<Vec<Value>>>> {
        let mut pairs = interval.query_pairs();
        pairs.push(("fields", fields.join(",")));
        let body: ColumnarResponse = self.get_json(path, &pairs).await?;
        info!("[AID] {}: {} rows", path, body.data.len());
        Ok(body.select(fields))
    }

    /// Fetch the events table column catalogue.
    pub async fn fetch_tables_info(&self) -> ApiResult<TablesInfo> {
        self.get_json(EVENTS_INFO_PATH, &[]).await
    }

    /// Fetch event rows, optionally limited to an interval.
    pub async fn fetch_events(&self, interval: Option<&TimeInterval>) -> ApiResult<ColumnarResponse> {
        let pairs = interval.map(TimeInterval::query_pairs).unwrap_or_default();
        let body: ColumnarResponse = self.get_json(EVENTS_PATH, &pairs).await?;
        info!("[AID] events: {} rows, {} fields", body.data.len(), body.fields.len());
        Ok(body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}
