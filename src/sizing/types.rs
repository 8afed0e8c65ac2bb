//! Core sizing types: configuration, catalog entries, and derived results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects how daily consumption is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Sum over the appliance list.
    #[default]
    Device,
    /// Convert a monthly bill amount at the average unit price.
    Bill,
}

impl InputMode {
    /// Parses `"device"` or `"bill"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "device" => Some(Self::Device),
            "bill" => Some(Self::Bill),
            _ => None,
        }
    }
}

/// Sizing parameters supplied by the caller. The engine only reads them.
///
/// # Examples
///
/// ```
/// use solar_sizer::sizing::types::SizingConfig;
///
/// let cfg = SizingConfig::default();
/// assert_eq!(cfg.peak_sun_hours, 4.8);
/// assert_eq!(cfg.panel_wattage, 450);
/// assert!(!cfg.include_battery);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Average peak sun hours per day for the region (> 0).
    pub peak_sun_hours: f64,
    /// Nameplate rating of a single panel in watts (> 0).
    pub panel_wattage: u32,
    /// Derating fraction for inverter, wiring and soiling losses, in (0, 1].
    pub system_efficiency: f64,
    /// Whether a storage battery should be sized.
    pub include_battery: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            peak_sun_hours: 4.8,
            panel_wattage: 450,
            system_efficiency: 0.8,
            include_battery: false,
        }
    }
}

/// Electrical connection of an inverter to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseType {
    #[serde(rename = "1-Phase")]
    SinglePhase,
    #[serde(rename = "3-Phase")]
    ThreePhase,
}

impl PhaseType {
    /// Maximum DC input voltage accepted by inverters of this phase type.
    pub fn max_dc_input_voltage(self) -> f64 {
        match self {
            Self::SinglePhase => 550.0,
            Self::ThreePhase => 1000.0,
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePhase => f.write_str("1-Phase"),
            Self::ThreePhase => f.write_str("3-Phase"),
        }
    }
}

/// One entry of the inverter catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterOption {
    /// Rated AC capacity (kW).
    pub capacity_kw: f64,
    /// Model name.
    pub label: String,
    pub brand: String,
    pub phase_type: PhaseType,
}

impl InverterOption {
    pub fn new(
        capacity_kw: f64,
        label: impl Into<String>,
        brand: impl Into<String>,
        phase_type: PhaseType,
    ) -> Self {
        Self {
            capacity_kw,
            label: label.into(),
            brand: brand.into(),
            phase_type,
        }
    }
}

/// How the panels are split across MPPT inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringBalance {
    /// All panels in one series string on MPPT 1.
    Single,
    /// Two strings of equal length (recommended).
    Balanced,
    /// Two strings differing by one panel, run on independent MPPT inputs.
    Unbalanced,
}

/// DC string wiring plan derived from the panel count and inverter phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringDesign {
    /// Number of series strings (1 or 2).
    pub total_strings: u32,
    /// Panels in the largest string.
    pub panels_per_string: u32,
    /// Panels in the second string (0 for a single string).
    pub panels_in_smaller_string: u32,
    /// MPPT inputs in use (equals `total_strings`).
    pub mppt_inputs_used: u32,
    pub balance: StringBalance,
    /// Longest string allowed by the inverter voltage limit.
    pub max_panels_per_string: u32,
    /// Nominal open-circuit voltage of the longest string (V).
    pub string_voltage_v: f64,
    /// True when even two strings exceed `max_panels_per_string`.
    pub exceeds_input_limit: bool,
    pub connection_description: String,
    pub input_mode_description: String,
}

/// Complete sizing snapshot for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Total daily consumption (Wh).
    pub total_daily_consumption_wh: f64,
    /// Monthly consumption over a 30-day month (kWh).
    pub monthly_consumption_kwh: f64,
    /// Unrounded DC nameplate requirement (W).
    pub required_system_size_watts: f64,
    /// DC nameplate requirement rounded up to 0.1 kWp.
    pub required_system_size_kwp: f64,
    pub number_of_panels: u32,
    /// Expected daily production of the rounded-up array (kWh, 1 decimal).
    pub estimated_daily_production_kwh: f64,
    /// `None` only when the inverter catalog is empty.
    pub recommended_inverter: Option<InverterOption>,
    /// `None` when no battery was requested.
    pub recommended_battery_size_kwh: Option<f64>,
    pub string_design: StringDesign,
}

impl CalculationResult {
    /// Daily consumption in kWh.
    pub fn daily_consumption_kwh(&self) -> f64 {
        self.total_daily_consumption_wh / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_mode_parses_known_values() {
        assert_eq!(InputMode::parse("device"), Some(InputMode::Device));
        assert_eq!(InputMode::parse("bill"), Some(InputMode::Bill));
        assert_eq!(InputMode::parse("solar"), None);
    }

    #[test]
    fn phase_voltage_limits() {
        assert_eq!(PhaseType::SinglePhase.max_dc_input_voltage(), 550.0);
        assert_eq!(PhaseType::ThreePhase.max_dc_input_voltage(), 1000.0);
    }

    #[test]
    fn phase_type_serializes_to_catalog_labels() {
        let json = serde_json::to_string(&PhaseType::ThreePhase).ok();
        assert_eq!(json.as_deref(), Some("\"3-Phase\""));
    }

    #[test]
    fn input_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: InputMode,
        }
        let w: Result<Wrapper, _> = toml::from_str("mode = \"bill\"");
        assert_eq!(w.ok().map(|w| w.mode), Some(InputMode::Bill));
    }
}
