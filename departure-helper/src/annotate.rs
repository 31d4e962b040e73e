//! Departure annotation.
//!
//! Derives signage colors and a CSS class from a departure's product type
//! and line. Annotation never fails: unknown types, unknown lines and
//! partial table entries all fall back to the default properties.

use crate::colors::{LineColor, LineColors};
use crate::domain::{
    AnnotatedDeparture, AnnotatedDepartures, Departure, DeparturesResult, LineProperties,
};

/// Bus lines share one color regardless of line.
const BUS_BG: &str = "#B60079";
const BUS_FG: &str = "#FFF";

/// Locomore express trains carry their own branding.
const LOCOMORE_LINE: &str = "LOCOMORE";
const LOCOMORE_BG: &str = "#E5690B";
const LOCOMORE_FG: &str = "#3E1717";

/// Compute the line properties for a single departure.
pub fn line_properties(departure: &Departure, colors: &LineColors) -> LineProperties {
    let mut properties = LineProperties::default();

    let fixed;
    let (source, css_class): (Option<&LineColor>, &str) = match departure.kind.as_str() {
        "suburban" => (colors.get("suburban", &departure.name), "sbahnsign"),
        "subway" => (colors.get("subway", &departure.name), "ubahnsign"),
        "bus" => {
            fixed = LineColor::new(BUS_BG, BUS_FG);
            (Some(&fixed), "bussign")
        }
        "tram" => (colors.get("tram", &departure.name), "tramsign"),
        "regional" => (colors.get("regional", &departure.name), "dbsign"),
        "express" if departure.line == LOCOMORE_LINE => {
            fixed = LineColor::new(LOCOMORE_BG, LOCOMORE_FG);
            (Some(&fixed), "locsign")
        }
        "express" => (None, "expresssign"),
        _ => (None, ""),
    };

    properties.css_class = css_class.to_string();

    if let Some(color) = source {
        if let Some(bg) = &color.bg {
            properties.bg_color = bg.clone();
        }
        if let Some(fg) = &color.fg {
            properties.fg_color = fg.clone();
        }
    }

    properties
}

/// Annotate every departure, preserving order and count.
pub fn annotate_departures(
    departures: Vec<Departure>,
    colors: &LineColors,
) -> Vec<AnnotatedDeparture> {
    departures
        .into_iter()
        .map(|departure| {
            let properties = line_properties(&departure, colors);
            AnnotatedDeparture {
                departure,
                properties,
            }
        })
        .collect()
}

/// Annotate a whole fetch result.
pub fn annotate_result(result: DeparturesResult, colors: &LineColors) -> AnnotatedDepartures {
    AnnotatedDepartures {
        station_id: result.station_id,
        departures_array: annotate_departures(result.departures_array, colors),
    }
}
