//! Inbound requests and outbound events.
//!
//! Both directions use the widget's notification envelope:
//! `{"notification": "GET_DEPARTURES", "payload": ...}`.

use serde::{Deserialize, Serialize};

use crate::domain::{AnnotatedDepartures, StationConfig, StationId};

/// A request from the widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(
    tag = "notification",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum HelperRequest {
    /// Register (or reuse) a fetcher, announce it, then fetch departures.
    CreateFetcher(StationConfig),

    /// Fetch departures for an already registered station.
    GetDepartures(StationId),

    /// Resolve and announce the station name again.
    StationNameMissingAfterInit(StationId),
}

/// An event sent to the widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(
    tag = "notification",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum HelperEvent {
    FetcherInit(FetcherInit),
    Departures(AnnotatedDepartures),
    FetchError(ErrorReport),
}

/// Announces a registered fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetcherInit {
    pub station_id: StationId,
    /// `None` when the name could not be resolved; the widget may ask again.
    pub station_name: Option<String>,
}

/// A failed request, reported against the station it was for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub station_id: StationId,
    pub message: String,
}

impl HelperEvent {
    /// The station this event concerns.
    pub fn station_id(&self) -> &StationId {
        match self {
            HelperEvent::FetcherInit(init) => &init.station_id,
            HelperEvent::Departures(departures) => &departures.station_id,
            HelperEvent::FetchError(report) => &report.station_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_create_fetcher() {
        let req: HelperRequest = serde_json::from_value(json!({
            "notification": "CREATE_FETCHER",
            "payload": {"stationId": 900100003, "maxDepartures": 5}
        }))
        .unwrap();

        match req {
            HelperRequest::CreateFetcher(config) => {
                assert_eq!(config.station_id.as_str(), "900100003");
                assert_eq!(config.max_departures, Some(5));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn parse_station_requests() {
        let req: HelperRequest = serde_json::from_value(json!({
            "notification": "GET_DEPARTURES",
            "payload": "900100003"
        }))
        .unwrap();
        assert_eq!(req, HelperRequest::GetDepartures("900100003".into()));

        let req: HelperRequest = serde_json::from_value(json!({
            "notification": "STATION_NAME_MISSING_AFTER_INIT",
            "payload": 900100003
        }))
        .unwrap();
        assert_eq!(
            req,
            HelperRequest::StationNameMissingAfterInit("900100003".into())
        );
    }

    #[test]
    fn unknown_notification_is_rejected() {
        let result = serde_json::from_value::<HelperRequest>(json!({
            "notification": "SOMETHING_ELSE",
            "payload": "1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn event_envelopes() {
        let init = HelperEvent::FetcherInit(FetcherInit {
            station_id: "100003".into(),
            station_name: Some("S+U Alexanderplatz".to_string()),
        });
        assert_eq!(
            serde_json::to_value(&init).unwrap(),
            json!({
                "notification": "FETCHER_INIT",
                "payload": {"stationId": "100003", "stationName": "S+U Alexanderplatz"}
            })
        );

        let error = HelperEvent::FetchError(ErrorReport {
            station_id: "100003".into(),
            message: "timeout".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "notification": "FETCH_ERROR",
                "payload": {"stationId": "100003", "message": "timeout"}
            })
        );

        let departures = HelperEvent::Departures(AnnotatedDepartures {
            station_id: "100003".into(),
            departures_array: Vec::new(),
        });
        let value = serde_json::to_value(&departures).unwrap();
        assert_eq!(value["notification"], "DEPARTURES");
        assert_eq!(value["payload"]["departuresArray"], json!([]));
    }

    #[test]
    fn event_station_id() {
        let event = HelperEvent::FetchError(ErrorReport {
            station_id: "7".into(),
            message: "x".to_string(),
        });
        assert_eq!(event.station_id().as_str(), "7");
    }
}
