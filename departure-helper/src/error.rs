//! Helper error types.

use crate::domain::StationId;
use crate::fetcher::FetchError;
use crate::messages::ErrorReport;

/// Errors handling a request for a station.
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    /// No fetcher has been created for the station.
    #[error("no fetcher registered for station {0}")]
    UnknownStation(StationId),

    /// The station's fetcher failed. Displays as the fetcher's own message.
    #[error("{source}")]
    Fetch {
        station_id: StationId,
        #[source]
        source: FetchError,
    },
}

impl HelperError {
    /// The station the failed request was for.
    pub fn station_id(&self) -> &StationId {
        match self {
            HelperError::UnknownStation(station_id) => station_id,
            HelperError::Fetch { station_id, .. } => station_id,
        }
    }

    /// Convert into the report sent to the widget.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            station_id: self.station_id().clone(),
            message: self.to_string(),
        }
    }
}
