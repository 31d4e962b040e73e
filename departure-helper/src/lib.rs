//! Departure helper for a transit dashboard widget.
//!
//! Keeps one long-lived departures fetcher per configured station, fetches
//! departure boards on request, and annotates every departure with the
//! colors and CSS class of its line before handing it to the widget.

pub mod annotate;
pub mod colors;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod helper;
pub mod messages;
pub mod registry;
pub mod vbb;
