//! Scripted fetchers for tests.
//!
//! Station names and fetch outcomes are set per station from the test, and
//! every construction and fetch is counted.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{Departure, DeparturesResult, StationConfig, StationId};

use super::{DepartureFetcher, FetchError, FetcherFactory};

#[derive(Default)]
struct Script {
    created: AtomicUsize,
    fetches: AtomicUsize,
    names: Mutex<HashMap<StationId, String>>,
    outcomes: Mutex<HashMap<StationId, VecDeque<Result<Vec<Departure>, String>>>>,
}

#[derive(Clone, Default)]
pub struct ScriptedFactory {
    script: Arc<Script>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `station_name()` resolve to `name` from now on.
    pub fn set_name(&self, station: &str, name: &str) {
        self.script
            .names
            .lock()
            .unwrap()
            .insert(StationId::new(station), name.to_string());
    }

    /// Make `station_name()` fail from now on.
    pub fn clear_name(&self, station: &str) {
        self.script.names.lock().unwrap().remove(&StationId::new(station));
    }

    /// Queue the outcome of the next fetch for `station`.
    ///
    /// With nothing queued, fetches succeed with an empty board.
    pub fn push_outcome(&self, station: &str, outcome: Result<Vec<Departure>, &str>) {
        self.script
            .outcomes
            .lock()
            .unwrap()
            .entry(StationId::new(station))
            .or_default()
            .push_back(outcome.map_err(str::to_string));
    }

    pub fn created(&self) -> usize {
        self.script.created.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.script.fetches.load(Ordering::SeqCst)
    }
}

impl FetcherFactory for ScriptedFactory {
    type Fetcher = ScriptedFetcher;

    fn create(&self, config: StationConfig) -> ScriptedFetcher {
        self.script.created.fetch_add(1, Ordering::SeqCst);
        ScriptedFetcher {
            station_id: config.station_id,
            script: Arc::clone(&self.script),
        }
    }
}

pub struct ScriptedFetcher {
    station_id: StationId,
    script: Arc<Script>,
}

impl DepartureFetcher for ScriptedFetcher {
    fn station_id(&self) -> &StationId {
        &self.station_id
    }

    async fn station_name(&self) -> Result<String, FetchError> {
        let name = self.script.names.lock().unwrap().get(&self.station_id).cloned();
        name.ok_or_else(|| FetchError::Unavailable("station name not known yet".to_string()))
    }

    async fn fetch_departures(&self) -> Result<DeparturesResult, FetchError> {
        self.script.fetches.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .outcomes
            .lock()
            .unwrap()
            .get_mut(&self.station_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Vec::new()));

        match outcome {
            Ok(departures_array) => Ok(DeparturesResult {
                station_id: self.station_id.clone(),
                departures_array,
            }),
            Err(message) => Err(FetchError::Unavailable(message)),
        }
    }
}
