//! Household rooftop solar sizing engine.

/// Free-text consultation advice behind a text generator seam.
pub mod advisory;
#[cfg(feature = "api")]
pub mod api;
pub mod appliances;
pub mod catalog;
pub mod config;
pub mod design;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
/// Consumption, array, inverter, string, and battery sizing.
pub mod sizing;
