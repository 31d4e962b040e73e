//! VBB REST API response DTOs.
//!
//! These map the `transport.rest` JSON format. Fields the helper does not
//! use are left out; optional fields are `Option` because the API omits
//! or nulls them depending on realtime data availability.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::domain::Departure;

/// Response from `GET /stops/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
}

/// Response from `GET /stops/{id}/departures`.
///
/// Older API versions return a bare array, newer ones wrap it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    Wrapped { departures: Vec<DepartureDto> },
    Bare(Vec<DepartureDto>),
}

impl DeparturesResponse {
    pub fn into_departures(self) -> Vec<DepartureDto> {
        match self {
            DeparturesResponse::Wrapped { departures } => departures,
            DeparturesResponse::Bare(departures) => departures,
        }
    }
}

/// One departure as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    pub when: Option<DateTime<FixedOffset>>,
    pub planned_when: Option<DateTime<FixedOffset>>,

    /// Delay in seconds.
    pub delay: Option<i64>,
    pub platform: Option<String>,
    pub direction: Option<String>,
    pub line: LineDto,
    pub cancelled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    /// Lowercase line id, e.g. `s7` or `locomore`.
    pub id: Option<String>,

    /// Display name, e.g. `S7` or `M41`.
    pub name: String,

    /// Product, e.g. `suburban`, `subway`, `tram`, `bus`, `regional`,
    /// `express`, `ferry`.
    pub product: Option<String>,
}

impl From<DepartureDto> for Departure {
    fn from(dto: DepartureDto) -> Self {
        let line = dto
            .line
            .id
            .as_deref()
            .unwrap_or(&dto.line.name)
            .to_uppercase();

        Departure {
            kind: dto.line.product.unwrap_or_default(),
            line,
            name: dto.line.name,
            direction: dto.direction.unwrap_or_default(),
            when: dto.when,
            planned_when: dto.planned_when,
            delay: dto.delay,
            platform: dto.platform,
            cancelled: dto.cancelled.unwrap_or(false),
        }
    }
}
