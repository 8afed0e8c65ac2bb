//! Optional storage battery sizing.

use super::system::ceil_to_tenth;

/// Share of one day's production held in reserve.
pub const RESERVE_FRACTION: f64 = 0.4;
/// Smallest practical battery module (kWh).
pub const MIN_BATTERY_KWH: f64 = 2.4;

/// Reserve before the module floor: 40 % of daily production, rounded up to 0.1 kWh.
pub fn raw_battery_kwh(daily_production_kwh: f64) -> f64 {
    ceil_to_tenth(daily_production_kwh * RESERVE_FRACTION)
}

/// Recommended capacity, or `None` when no battery was requested.
pub fn recommended_battery_kwh(daily_production_kwh: f64, include_battery: bool) -> Option<f64> {
    if !include_battery {
        return None;
    }
    Some(raw_battery_kwh(daily_production_kwh).max(MIN_BATTERY_KWH))
}
