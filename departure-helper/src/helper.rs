//! Request dispatch.
//!
//! Receives widget requests from a channel and drives the registry. Each
//! request runs in its own task, so a slow fetch for one station never
//! holds up another.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::colors::LineColors;
use crate::domain::{StationConfig, StationId};
use crate::fetcher::{DepartureFetcher, FetcherFactory};
use crate::messages::{HelperEvent, HelperRequest};
use crate::registry::{FetcherRegistry, Registration};

/// Background helper serving one widget.
pub struct DepartureHelper<F: FetcherFactory> {
    registry: FetcherRegistry<F>,
}

impl<F: FetcherFactory> DepartureHelper<F> {
    /// Create a helper that emits its events on `events`.
    pub fn new(factory: F, colors: LineColors, events: mpsc::Sender<HelperEvent>) -> Self {
        Self {
            registry: FetcherRegistry::new(factory, colors, events),
        }
    }

    pub fn registry(&self) -> &FetcherRegistry<F> {
        &self.registry
    }

    /// Handle a single request to completion.
    pub async fn handle(&self, request: HelperRequest) {
        match request {
            HelperRequest::CreateFetcher(config) => self.create_fetcher(config).await,
            HelperRequest::GetDepartures(station_id) => {
                self.registry.request_departures(&station_id).await
            }
            HelperRequest::StationNameMissingAfterInit(station_id) => {
                self.resend_init(&station_id).await
            }
        }
    }

    /// Register (or reuse) the station's fetcher, announce it, then fetch.
    pub async fn create_fetcher(&self, config: StationConfig) {
        let (fetcher, registration) = self.registry.get_or_create(config).await;

        let station_name = self.registry.notify_init(&fetcher).await;
        let station_id = fetcher.station_id();
        let name = station_name.as_deref().unwrap_or("<unknown>");

        match registration {
            Registration::Created => info!(
                station_id = %station_id,
                "Transportation fetcher for station {} created",
                name
            ),
            Registration::Existing => info!(
                station_id = %station_id,
                "Using existing transportation fetcher for station {}",
                name
            ),
        }

        self.registry.request_departures(station_id).await;
    }

    /// Announce an already registered station again.
    pub async fn resend_init(&self, station_id: &StationId) {
        match self.registry.get(station_id).await {
            Ok(fetcher) => {
                self.registry.notify_init(&fetcher).await;
            }
            Err(e) => {
                warn!(
                    station_id = %station_id,
                    error = %e,
                    "Station name requested for unknown station"
                );
                self.registry.report(&e).await;
            }
        }
    }

    /// Serve requests until the channel closes, then wait for in-flight
    /// requests to finish.
    pub async fn run(self: Arc<Self>, mut requests: mpsc::Receiver<HelperRequest>) {
        let mut tasks = JoinSet::new();

        while let Some(request) = requests.recv().await {
            let helper = Arc::clone(&self);
            tasks.spawn(async move { helper.handle(request).await });

            while let Some(result) = tasks.try_join_next() {
                log_task_result(result);
            }
        }

        while let Some(result) = tasks.join_next().await {
            log_task_result(result);
        }

        info!("Request channel closed, helper stopped");
    }

    /// Drop every registered fetcher.
    pub async fn reset(&self) {
        self.registry.reset().await;
    }
}

fn log_task_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!(error = %e, "Request task failed");
    }
}
