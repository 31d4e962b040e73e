//! VBB (Verkehrsverbund Berlin-Brandenburg) departures backend.
//!
//! Talks to a `transport.rest`-style REST API:
//! - `GET /stops/{id}` for the stop name
//! - `GET /stops/{id}/departures?when=..&duration=..` for the board
//!
//! Times are returned as ISO 8601 with the local offset, delays in seconds.

mod client;
mod fetcher;
mod types;

pub use client::{VbbClient, VbbConfig};
pub use fetcher::{VbbFetcher, VbbFetcherFactory};
pub use types::{DepartureDto, DeparturesResponse, LineDto, StopDto};
