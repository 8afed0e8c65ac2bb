//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_sizer::appliances::{ApplianceLoad, ApplianceSpec};
use solar_sizer::catalog;
use solar_sizer::sizing::engine::{SizingInput, compute_sizing};
use solar_sizer::sizing::types::{CalculationResult, InputMode, SizingConfig};

/// A load with explicit power, daily hours, and quantity.
pub fn load(id: &str, watts: f64, hours_per_day: f64, quantity: u32) -> ApplianceLoad {
    let mut l = ApplianceLoad::from_spec(&ApplianceSpec::new(id, id, "Other", watts));
    l.hours_per_day = hours_per_day;
    l.quantity = quantity;
    l
}

/// One 1000 W appliance used 5 h/day: 5000 Wh/day.
pub fn reference_loads() -> Vec<ApplianceLoad> {
    vec![load("heater", 1000.0, 5.0, 1)]
}

/// Default configuration (4.8 h, 450 W, 0.8) with the battery toggle set.
pub fn config_with_battery(include_battery: bool) -> SizingConfig {
    SizingConfig {
        include_battery,
        ..SizingConfig::default()
    }
}

/// Sizes against the built-in inverter catalog.
pub fn size(
    mode: InputMode,
    loads: &[ApplianceLoad],
    monthly_bill: f64,
    config: &SizingConfig,
) -> CalculationResult {
    let inverters = catalog::inverters();
    compute_sizing(&SizingInput {
        mode,
        loads,
        monthly_bill,
        config,
        inverters: &inverters,
    })
}

/// Sizes a device-mode load list with the default configuration.
pub fn size_devices(loads: &[ApplianceLoad]) -> CalculationResult {
    size(InputMode::Device, loads, 0.0, &SizingConfig::default())
}
