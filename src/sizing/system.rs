//! Array sizing: DC nameplate requirement, panel count, and production estimate.

use super::types::SizingConfig;

/// Relative slack absorbed before rounding up, so representation noise such
/// as `3.0 * 0.4 == 1.2000000000000002` does not jump a whole step.
const ROUNDING_SLACK: f64 = 4.0 * f64::EPSILON;

/// `ceil` that ignores a few ulps of excess over an integer.
fn ceil_with_slack(value: f64) -> f64 {
    (value - value.abs() * ROUNDING_SLACK).ceil()
}

/// Rounds up to the next multiple of 0.1.
pub fn ceil_to_tenth(value: f64) -> f64 {
    ceil_with_slack(value * 10.0) / 10.0
}

/// Rounds half away from zero to one decimal.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds up to a whole count.
fn ceil_count(value: f64) -> u32 {
    let n = ceil_with_slack(value);
    if n <= 0.0 {
        0
    } else if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n as u32
    }
}

/// Derived array dimensions for one consumption figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSize {
    /// Unrounded DC nameplate requirement (W).
    pub required_watts: f64,
    /// Requirement rounded up to 0.1 kWp.
    pub required_kwp: f64,
    pub number_of_panels: u32,
    /// Production of the rounded-up panel count (kWh/day, 1 decimal).
    pub estimated_daily_production_kwh: f64,
}

/// Sizes the array for `daily_wh` of consumption.
///
/// Zero consumption yields a zero-sized system without dividing by zero.
///
/// # Examples
///
/// ```
/// use solar_sizer::sizing::system::size_system;
/// use solar_sizer::sizing::types::SizingConfig;
///
/// let size = size_system(5000.0, &SizingConfig::default());
/// assert_eq!(size.required_kwp, 1.4);
/// assert_eq!(size.number_of_panels, 3);
/// assert_eq!(size.estimated_daily_production_kwh, 5.2);
/// ```
pub fn size_system(daily_wh: f64, config: &SizingConfig) -> SystemSize {
    let required_watts = if daily_wh > 0.0 {
        (daily_wh / config.peak_sun_hours) / config.system_efficiency
    } else {
        0.0
    };

    let required_kwp = ceil_to_tenth(required_watts / 1000.0);
    let panel_w = f64::from(config.panel_wattage);
    let number_of_panels = ceil_count(required_watts / panel_w);

    let production_wh =
        f64::from(number_of_panels) * panel_w * config.peak_sun_hours * config.system_efficiency;

    SystemSize {
        required_watts,
        required_kwp,
        number_of_panels,
        estimated_daily_production_kwh: round_to_tenth(production_wh / 1000.0),
    }
}
