//! Fetcher backed by the VBB REST API.

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::{DeparturesResult, StationConfig, StationId};
use crate::fetcher::{DepartureFetcher, FetchError, FetcherFactory};

use super::client::VbbClient;

/// Builds [`VbbFetcher`]s sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct VbbFetcherFactory {
    client: VbbClient,
}

impl VbbFetcherFactory {
    pub fn new(client: VbbClient) -> Self {
        Self { client }
    }
}

impl FetcherFactory for VbbFetcherFactory {
    type Fetcher = VbbFetcher;

    fn create(&self, config: StationConfig) -> VbbFetcher {
        VbbFetcher::new(self.client.clone(), config)
    }
}

/// Departures and stop name for one VBB station.
#[derive(Debug)]
pub struct VbbFetcher {
    client: VbbClient,
    config: StationConfig,

    /// Only set once a lookup succeeds; failed lookups are retried.
    station_name: RwLock<Option<String>>,
}

impl VbbFetcher {
    pub fn new(client: VbbClient, config: StationConfig) -> Self {
        Self {
            client,
            config,
            station_name: RwLock::new(None),
        }
    }
}

impl DepartureFetcher for VbbFetcher {
    fn station_id(&self) -> &StationId {
        &self.config.station_id
    }

    async fn station_name(&self) -> Result<String, FetchError> {
        if let Some(name) = self.station_name.read().await.clone() {
            return Ok(name);
        }

        let name = self.client.stop_name(&self.config.station_id).await?;
        *self.station_name.write().await = Some(name.clone());
        Ok(name)
    }

    async fn fetch_departures(&self) -> Result<DeparturesResult, FetchError> {
        let when = Utc::now() + Duration::minutes(i64::from(self.config.time_to_station));

        let departures = self
            .client
            .departures(&self.config.station_id, when, self.config.departure_minutes)
            .await?;

        Ok(DeparturesResult {
            station_id: self.config.station_id.clone(),
            departures_array: self.config.select_departures(departures),
        })
    }
}
