//! Mock fetchers for running without API access.
//!
//! Loads sample boards from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Departure, DeparturesResult, StationConfig, StationId};

use super::error::FetchError;
use super::{DepartureFetcher, FetcherFactory};

/// One station's mock board, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockStation {
    pub station_name: String,
    pub departures: Vec<Departure>,
}

/// Factory serving boards loaded from a directory.
///
/// Expects files named `{stationId}.json` (e.g. `900100003.json`).
#[derive(Debug, Clone)]
pub struct MockFetcherFactory {
    stations: Arc<HashMap<StationId, MockStation>>,
}

impl MockFetcherFactory {
    /// Load every `.json` board in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let mut stations = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FetchError::Unavailable(format!("failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                FetchError::Unavailable(format!("failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let station_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(StationId::from)
                .ok_or_else(|| FetchError::Unavailable(format!("invalid filename: {:?}", path)))?;

            let json = std::fs::read_to_string(&path).map_err(|e| {
                FetchError::Unavailable(format!("failed to read {:?}: {}", path, e))
            })?;

            let station: MockStation = serde_json::from_str(&json).map_err(|e| FetchError::Json {
                message: format!("{:?}: {}", path, e),
            })?;

            stations.insert(station_id, station);
        }

        if stations.is_empty() {
            return Err(FetchError::Unavailable(format!(
                "no mock board files found in {:?}",
                data_dir
            )));
        }

        Ok(Self::from_stations(stations))
    }

    /// Build a factory from boards already in memory.
    pub fn from_stations(stations: HashMap<StationId, MockStation>) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }

    /// Stations with mock data available.
    pub fn available_stations(&self) -> Vec<StationId> {
        let mut ids: Vec<_> = self.stations.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl FetcherFactory for MockFetcherFactory {
    type Fetcher = MockFetcher;

    fn create(&self, config: StationConfig) -> MockFetcher {
        MockFetcher {
            config,
            stations: Arc::clone(&self.stations),
        }
    }
}

/// Fetcher serving one station's mock board.
#[derive(Debug)]
pub struct MockFetcher {
    config: StationConfig,
    stations: Arc<HashMap<StationId, MockStation>>,
}

impl MockFetcher {
    fn station(&self) -> Result<&MockStation, FetchError> {
        self.stations.get(&self.config.station_id).ok_or_else(|| {
            FetchError::Unavailable(format!(
                "no mock data for station {}",
                self.config.station_id
            ))
        })
    }
}

impl DepartureFetcher for MockFetcher {
    fn station_id(&self) -> &StationId {
        &self.config.station_id
    }

    async fn station_name(&self) -> Result<String, FetchError> {
        Ok(self.station()?.station_name.clone())
    }

    async fn fetch_departures(&self) -> Result<DeparturesResult, FetchError> {
        let station = self.station()?;
        Ok(DeparturesResult {
            station_id: self.config.station_id.clone(),
            departures_array: self.config.select_departures(station.departures.clone()),
        })
    }
}
