//! Daily consumption aggregation for device and bill input modes.

use crate::appliances::ApplianceLoad;

use super::types::InputMode;

/// Average electricity unit price used to convert a bill into energy (per kWh).
pub const AVERAGE_UNIT_PRICE_PER_KWH: f64 = 2500.0;
/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Sums `quantity * watts * hours` over all loads (Wh/day).
///
/// An empty list yields 0.
pub fn device_daily_wh(loads: &[ApplianceLoad]) -> f64 {
    loads.iter().map(ApplianceLoad::daily_energy_wh).sum()
}

/// Converts a monthly bill amount into daily energy (Wh/day).
///
/// # Examples
///
/// ```
/// use solar_sizer::sizing::consumption::bill_daily_wh;
///
/// let wh = bill_daily_wh(1_000_000.0);
/// assert!((wh - 13_333.333).abs() < 0.01);
/// ```
pub fn bill_daily_wh(monthly_bill: f64) -> f64 {
    (monthly_bill / AVERAGE_UNIT_PRICE_PER_KWH) * 1000.0 / DAYS_PER_MONTH
}

/// Daily consumption for the selected input mode (Wh/day).
///
/// # Arguments
///
/// * `mode` - Which input drives the calculation
/// * `loads` - Appliance loads, used in [`InputMode::Device`]
/// * `monthly_bill` - Monthly bill amount, used in [`InputMode::Bill`]
pub fn total_daily_consumption_wh(
    mode: InputMode,
    loads: &[ApplianceLoad],
    monthly_bill: f64,
) -> f64 {
    match mode {
        InputMode::Device => device_daily_wh(loads),
        InputMode::Bill => bill_daily_wh(monthly_bill),
    }
}

/// Monthly consumption over a 30-day month (kWh).
pub fn monthly_consumption_kwh(daily_wh: f64) -> f64 {
    daily_wh * DAYS_PER_MONTH / 1000.0
}
