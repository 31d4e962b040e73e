//! Departure records, before and after annotation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::station::StationId;

/// One scheduled departure at a station.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Product type, e.g. `suburban`, `subway`, `bus`, `tram`, `regional`,
    /// `express`. Unknown types are passed through untouched.
    #[serde(rename = "type")]
    pub kind: String,

    /// Line identifier in upper case (e.g. `S7`, `LOCOMORE`).
    pub line: String,

    /// Human-readable line name, used as the color table key (e.g. `S7`).
    pub name: String,

    /// Final destination shown on the vehicle.
    pub direction: String,

    /// Expected departure time, including delay. Absent for some
    /// cancelled services.
    #[serde(default)]
    pub when: Option<DateTime<FixedOffset>>,

    /// Timetabled departure time.
    #[serde(default)]
    pub planned_when: Option<DateTime<FixedOffset>>,

    /// Delay in seconds, if realtime data is available.
    #[serde(default)]
    pub delay: Option<i64>,

    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub cancelled: bool,
}

impl Departure {
    /// Create a departure with only the line attributes set.
    pub fn new(
        kind: impl Into<String>,
        line: impl Into<String>,
        name: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            line: line.into(),
            name: name.into(),
            direction: direction.into(),
            when: None,
            planned_when: None,
            delay: None,
            platform: None,
            cancelled: false,
        }
    }
}

/// Display metadata derived from a departure's line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProperties {
    pub bg_color: String,
    pub fg_color: String,
    pub css_class: String,
}

impl Default for LineProperties {
    fn default() -> Self {
        Self {
            bg_color: "#333".to_string(),
            fg_color: "#FFF".to_string(),
            css_class: String::new(),
        }
    }
}

/// A departure together with its line properties.
///
/// Serializes flat, so the widget sees `bgColor`, `fgColor` and `cssClass`
/// next to the departure's own fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnnotatedDeparture {
    #[serde(flatten)]
    pub departure: Departure,

    #[serde(flatten)]
    pub properties: LineProperties,
}

/// The outcome of one successful fetch for a station.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesResult {
    pub station_id: StationId,
    pub departures_array: Vec<Departure>,
}

/// A fetch result after annotation, as sent to the widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDepartures {
    pub station_id: StationId,
    pub departures_array: Vec<AnnotatedDeparture>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_properties() {
        let props = LineProperties::default();
        assert_eq!(props.bg_color, "#333");
        assert_eq!(props.fg_color, "#FFF");
        assert_eq!(props.css_class, "");
    }

    #[test]
    fn departure_wire_names() {
        let json = r#"{
            "type": "subway",
            "line": "U2",
            "name": "U2",
            "direction": "Pankow",
            "when": "2024-03-15T10:04:00+01:00",
            "plannedWhen": "2024-03-15T10:03:00+01:00",
            "delay": 60
        }"#;
        let dep: Departure = serde_json::from_str(json).unwrap();
        assert_eq!(dep.kind, "subway");
        assert_eq!(dep.delay, Some(60));
        assert!(!dep.cancelled);
        assert!(dep.platform.is_none());
        assert!(dep.when.unwrap() > dep.planned_when.unwrap());
    }

    #[test]
    fn annotated_departure_is_flat() {
        let annotated = AnnotatedDeparture {
            departure: Departure::new("bus", "M41", "M41", "Sonnenallee"),
            properties: LineProperties {
                bg_color: "#B60079".to_string(),
                fg_color: "#FFF".to_string(),
                css_class: "bussign".to_string(),
            },
        };

        let value = serde_json::to_value(&annotated).unwrap();
        assert_eq!(value["type"], "bus");
        assert_eq!(value["direction"], "Sonnenallee");
        assert_eq!(value["bgColor"], "#B60079");
        assert_eq!(value["fgColor"], "#FFF");
        assert_eq!(value["cssClass"], "bussign");
    }
}
