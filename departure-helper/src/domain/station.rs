//! Station identifiers and per-station configuration.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::departure::Departure;

/// An opaque transit stop identifier (e.g. `900100003` for Alexanderplatz).
///
/// The widget sends ids either as JSON strings or JSON numbers. Both forms
/// deserialize to the same `StationId`, and ids always serialize as strings,
/// so `100003` and `"100003"` address the same fetcher.
///
/// # Examples
///
/// ```
/// use departure_helper::domain::StationId;
///
/// let a: StationId = serde_json::from_str("900100003").unwrap();
/// let b: StationId = serde_json::from_str("\"900100003\"").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "900100003");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => StationId(s),
            Raw::Number(n) => StationId(n.to_string()),
        })
    }
}

/// Configuration for one station's fetcher, as sent by the widget.
///
/// Known options are typed; anything else the widget sends is kept in
/// `extra` so nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationConfig {
    pub station_id: StationId,

    /// Walking time to the station in minutes. Departures sooner than this
    /// are not requested.
    #[serde(default)]
    pub time_to_station: u32,

    /// How many minutes ahead to look for departures.
    #[serde(default = "default_departure_minutes")]
    pub departure_minutes: u32,

    /// Maximum number of departures to return.
    #[serde(default)]
    pub max_departures: Option<usize>,

    /// Product types (e.g. `bus`, `express`) to leave out.
    #[serde(default)]
    pub excluded_transportation_types: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_departure_minutes() -> u32 {
    30
}

impl StationConfig {
    /// Create a config for `station_id` with default options.
    pub fn new(station_id: impl Into<StationId>) -> Self {
        Self {
            station_id: station_id.into(),
            time_to_station: 0,
            departure_minutes: default_departure_minutes(),
            max_departures: None,
            excluded_transportation_types: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the walking time to the station.
    pub fn with_time_to_station(mut self, mins: u32) -> Self {
        self.time_to_station = mins;
        self
    }

    /// Set the maximum number of departures returned.
    pub fn with_max_departures(mut self, n: usize) -> Self {
        self.max_departures = Some(n);
        self
    }

    /// Exclude a product type.
    pub fn excluding(mut self, product: impl Into<String>) -> Self {
        self.excluded_transportation_types.push(product.into());
        self
    }

    /// Apply this station's filters to a fetched board.
    ///
    /// Drops excluded product types, orders by expected departure time
    /// (the planned time for cancelled services; departures with neither
    /// go last), then truncates to `max_departures`.
    pub fn select_departures(&self, mut departures: Vec<Departure>) -> Vec<Departure> {
        departures.retain(|d| !self.excluded_transportation_types.contains(&d.kind));
        departures.sort_by_key(|d| {
            let at = d.when.or(d.planned_when);
            (at.is_none(), at)
        });
        if let Some(max) = self.max_departures {
            departures.truncate(max);
        }
        departures
    }
}
