//! Per-station fetcher registry.
//!
//! Keeps exactly one long-lived fetcher per station id. Fetchers are
//! created lazily on first request and live until [`FetcherRegistry::reset`].
//! The registry also runs the fetch → annotate → emit pipeline, so every
//! outcome for a station reaches the widget as an event.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::annotate::annotate_result;
use crate::colors::LineColors;
use crate::domain::{AnnotatedDepartures, StationConfig, StationId};
use crate::error::HelperError;
use crate::fetcher::{DepartureFetcher, FetcherFactory};
use crate::messages::{FetcherInit, HelperEvent};

/// Whether `get_or_create` built a new fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    Existing,
}

/// Registry of fetchers keyed by station id.
pub struct FetcherRegistry<F: FetcherFactory> {
    factory: F,

    /// Unbounded, no TTL: entries are only dropped by `reset`.
    fetchers: MokaCache<StationId, Arc<F::Fetcher>>,

    colors: Arc<LineColors>,
    events: mpsc::Sender<HelperEvent>,
}

impl<F: FetcherFactory> FetcherRegistry<F> {
    pub fn new(factory: F, colors: LineColors, events: mpsc::Sender<HelperEvent>) -> Self {
        Self {
            factory,
            fetchers: MokaCache::builder().build(),
            colors: Arc::new(colors),
            events,
        }
    }

    /// Return the fetcher for `config.station_id`, creating it if needed.
    ///
    /// The check and insert are a single atomic step, so concurrent calls
    /// for the same station construct at most one fetcher.
    pub async fn get_or_create(
        &self,
        config: StationConfig,
    ) -> (Arc<F::Fetcher>, Registration) {
        let factory = &self.factory;
        let entry = self
            .fetchers
            .entry(config.station_id.clone())
            .or_insert_with(async move { Arc::new(factory.create(config)) })
            .await;

        let registration = if entry.is_fresh() {
            Registration::Created
        } else {
            Registration::Existing
        };

        (entry.into_value(), registration)
    }

    /// Look up a registered fetcher without creating one.
    pub async fn get(&self, station_id: &StationId) -> Result<Arc<F::Fetcher>, HelperError> {
        self.fetchers
            .get(station_id)
            .await
            .ok_or_else(|| HelperError::UnknownStation(station_id.clone()))
    }

    pub fn contains(&self, station_id: &StationId) -> bool {
        self.fetchers.contains_key(station_id)
    }

    /// Number of registered fetchers.
    pub async fn len(&self) -> usize {
        self.fetchers.run_pending_tasks().await;
        self.fetchers.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Resolve the fetcher's station name and emit `FETCHER_INIT`.
    ///
    /// The name is looked up afresh on every call. A failed lookup is
    /// reported as a `None` name rather than suppressing the event, so the
    /// widget can ask again. Returns the resolved name.
    pub async fn notify_init(&self, fetcher: &F::Fetcher) -> Option<String> {
        let station_id = fetcher.station_id();

        let station_name = match fetcher.station_name().await {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(station_id = %station_id, error = %e, "Failed to resolve station name");
                None
            }
        };

        self.emit(HelperEvent::FetcherInit(FetcherInit {
            station_id: station_id.clone(),
            station_name: station_name.clone(),
        }))
        .await;

        station_name
    }

    /// Fetch and annotate departures for a registered station.
    pub async fn fetch_annotated(
        &self,
        station_id: &StationId,
    ) -> Result<AnnotatedDepartures, HelperError> {
        let fetcher = self.get(station_id).await?;

        let result = fetcher
            .fetch_departures()
            .await
            .map_err(|source| HelperError::Fetch {
                station_id: station_id.clone(),
                source,
            })?;

        Ok(annotate_result(result, &self.colors))
    }

    /// Fetch departures for a station and emit `DEPARTURES` or `FETCH_ERROR`.
    ///
    /// Failures are reported, never retried, and leave the registry
    /// untouched.
    pub async fn request_departures(&self, station_id: &StationId) {
        let event = match self.fetch_annotated(station_id).await {
            Ok(departures) => {
                debug!(
                    station_id = %station_id,
                    count = departures.departures_array.len(),
                    "Fetched departures"
                );
                HelperEvent::Departures(departures)
            }
            Err(e) => {
                warn!(
                    station_id = %station_id,
                    error = %e,
                    "Error while fetching departures"
                );
                HelperEvent::FetchError(e.to_report())
            }
        };

        self.emit(event).await;
    }

    /// Report an error for a station.
    pub async fn report(&self, error: &HelperError) {
        self.emit(HelperEvent::FetchError(error.to_report())).await;
    }

    /// Drop every registered fetcher.
    pub async fn reset(&self) {
        self.fetchers.invalidate_all();
        self.fetchers.run_pending_tasks().await;
    }

    async fn emit(&self, event: HelperEvent) {
        if let Err(unsent) = self.events.send(event).await {
            debug!(
                station_id = %unsent.0.station_id(),
                "Event receiver closed, dropping event"
            );
        }
    }
}
