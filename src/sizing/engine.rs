//! Single-pass assembly of the complete sizing result.

use tracing::{debug, warn};

use crate::appliances::ApplianceLoad;

use super::battery::recommended_battery_kwh;
use super::consumption::{monthly_consumption_kwh, total_daily_consumption_wh};
use super::inverter::select_inverter;
use super::strings::plan_strings;
use super::system::size_system;
use super::types::{CalculationResult, InputMode, InverterOption, PhaseType, SizingConfig};

/// Everything the engine reads for one calculation.
#[derive(Debug, Clone, Copy)]
pub struct SizingInput<'a> {
    pub mode: InputMode,
    /// Used when `mode` is [`InputMode::Device`].
    pub loads: &'a [ApplianceLoad],
    /// Used when `mode` is [`InputMode::Bill`].
    pub monthly_bill: f64,
    pub config: &'a SizingConfig,
    /// Ordered by ascending capacity.
    pub inverters: &'a [InverterOption],
}

/// Computes the full sizing snapshot for `input`.
///
/// Pure and deterministic: identical inputs always give an identical result.
///
/// # Examples
///
/// ```
/// use solar_sizer::appliances::{ApplianceLoad, ApplianceSpec};
/// use solar_sizer::catalog;
/// use solar_sizer::sizing::engine::{SizingInput, compute_sizing};
/// use solar_sizer::sizing::types::{InputMode, SizingConfig};
///
/// let mut heater = ApplianceLoad::from_spec(&ApplianceSpec::new("h", "Heater", "Household", 1000.0));
/// heater.hours_per_day = 5.0;
/// let config = SizingConfig::default();
/// let inverters = catalog::inverters();
///
/// let result = compute_sizing(&SizingInput {
///     mode: InputMode::Device,
///     loads: &[heater],
///     monthly_bill: 0.0,
///     config: &config,
///     inverters: &inverters,
/// });
/// assert_eq!(result.total_daily_consumption_wh, 5000.0);
/// assert_eq!(result.number_of_panels, 3);
/// ```
pub fn compute_sizing(input: &SizingInput<'_>) -> CalculationResult {
    let daily_wh = total_daily_consumption_wh(input.mode, input.loads, input.monthly_bill);
    let size = size_system(daily_wh, input.config);
    debug!(
        "daily {:.1} Wh -> {:.1} W required, {} x {} W panels",
        daily_wh, size.required_watts, size.number_of_panels, input.config.panel_wattage
    );

    let inverter = select_inverter(size.required_kwp, input.inverters).cloned();
    let phase = inverter
        .as_ref()
        .map_or(PhaseType::SinglePhase, |inv| inv.phase_type);

    let string_design = plan_strings(size.number_of_panels, phase);
    if string_design.exceeds_input_limit {
        warn!(
            "{} panels exceed two strings of {} on a {} inverter",
            size.number_of_panels, string_design.max_panels_per_string, phase
        );
    }

    CalculationResult {
        total_daily_consumption_wh: daily_wh,
        monthly_consumption_kwh: monthly_consumption_kwh(daily_wh),
        required_system_size_watts: size.required_watts,
        required_system_size_kwp: size.required_kwp,
        number_of_panels: size.number_of_panels,
        estimated_daily_production_kwh: size.estimated_daily_production_kwh,
        recommended_inverter: inverter,
        recommended_battery_size_kwh: recommended_battery_kwh(
            size.estimated_daily_production_kwh,
            input.config.include_battery,
        ),
        string_design,
    }
}
