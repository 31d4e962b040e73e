//! Core domain types.
//!
//! Station identifiers and configuration, departure records, and the
//! display metadata attached to them.

mod departure;
mod station;

pub use departure::{
    AnnotatedDeparture, AnnotatedDepartures, Departure, DeparturesResult, LineProperties,
};
pub use station::{StationConfig, StationId};
