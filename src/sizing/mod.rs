//! Sizing engine: consumption, array size, inverter, strings, and battery.

/// Optional storage battery sizing.
pub mod battery;
/// Consumption aggregation for device and bill modes.
pub mod consumption;
pub mod engine;
/// Inverter selection with largest-entry fallback.
pub mod inverter;
pub mod strings;
/// Array size, panel count, and production estimate.
pub mod system;
pub mod types;

pub use engine::{SizingInput, compute_sizing};
pub use types::{
    CalculationResult, InputMode, InverterOption, PhaseType, SizingConfig, StringBalance,
    StringDesign,
};
