//! Per-station departure fetchers.
//!
//! A fetcher serves exactly one station. The registry constructs fetchers
//! through a [`FetcherFactory`] and only ever talks to them through the
//! [`DepartureFetcher`] trait, so the transport behind a fetcher (the VBB
//! REST API, mock files, a test double) is interchangeable.

mod error;
mod mock;

#[cfg(test)]
pub(crate) mod scripted;

use std::future::Future;

use crate::domain::{DeparturesResult, StationConfig, StationId};

pub use error::FetchError;
pub use mock::{MockFetcher, MockFetcherFactory, MockStation};

/// Source of departures and metadata for one station.
pub trait DepartureFetcher: Send + Sync + 'static {
    /// The station this fetcher serves.
    fn station_id(&self) -> &StationId;

    /// Resolve the station's human-readable name.
    ///
    /// May be called any number of times. A failed lookup does not prevent
    /// a later call from succeeding.
    fn station_name(&self) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Fetch the current departures for the station.
    fn fetch_departures(
        &self,
    ) -> impl Future<Output = Result<DeparturesResult, FetchError>> + Send;
}

/// Constructs fetchers from station configs.
///
/// Construction is synchronous and does no I/O, so the registry can create
/// and store a fetcher in one atomic step.
pub trait FetcherFactory: Send + Sync + 'static {
    type Fetcher: DepartureFetcher;

    fn create(&self, config: StationConfig) -> Self::Fetcher;
}
