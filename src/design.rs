//! Installer-facing design sheet: cabling, protection, and string electricals.

use serde::Serialize;

use crate::sizing::types::{CalculationResult, PhaseType};

/// Working voltage per panel at maximum power (V).
pub const PANEL_VMP_V: f64 = 41.5;
/// Short-circuit current per string (A).
pub const PANEL_ISC_A: f64 = 11.5;
/// Capacity assumed for cable sizing when no inverter was selected (kW).
const FALLBACK_INVERTER_KW: f64 = 5.0;

pub const DC_CABLE: &str = "DC 4.0 mm² (Solar Cable)";

/// Derived installation figures for one sizing result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianSheet {
    pub dc_cable: &'static str,
    pub ac_cable: &'static str,
    pub breaker: &'static str,
    pub grid_connection: &'static str,
    /// Open-circuit voltage of the longest string (V).
    pub string_voc_v: f64,
    /// Working voltage of the longest string (V).
    pub string_vmp_v: f64,
    pub string_isc_a: f64,
    pub total_strings: u32,
    pub battery_kwh: Option<f64>,
}

/// AC cable and breaker for an inverter of `capacity_kw` and `phase`.
pub fn ac_protection(capacity_kw: f64, phase: PhaseType) -> (&'static str, &'static str) {
    if phase == PhaseType::ThreePhase {
        return if capacity_kw <= 10.0 {
            ("4x4.0 mm² + E", "25A (3P)")
        } else {
            ("4x10.0 mm² + E", "40A (3P)")
        };
    }
    if capacity_kw <= 3.0 {
        ("2x2.5 mm² + E", "20A")
    } else if capacity_kw <= 5.5 {
        ("2x6.0 mm² + E", "40A")
    } else if capacity_kw <= 10.0 {
        ("2x10.0 mm² + E", "63A")
    } else {
        ("2x4.0 mm² + E", "32A")
    }
}

impl TechnicianSheet {
    pub fn from_result(result: &CalculationResult) -> Self {
        let (capacity, phase) = result
            .recommended_inverter
            .as_ref()
            .map_or((FALLBACK_INVERTER_KW, PhaseType::SinglePhase), |inv| {
                (inv.capacity_kw, inv.phase_type)
            });
        let (ac_cable, breaker) = ac_protection(capacity, phase);
        let design = &result.string_design;

        Self {
            dc_cable: DC_CABLE,
            ac_cable,
            breaker,
            grid_connection: match phase {
                PhaseType::ThreePhase => "3-phase (380V)",
                PhaseType::SinglePhase => "1-phase (220V)",
            },
            string_voc_v: design.string_voltage_v,
            string_vmp_v: f64::from(design.panels_per_string) * PANEL_VMP_V,
            string_isc_a: PANEL_ISC_A,
            total_strings: design.total_strings,
            battery_kwh: result.recommended_battery_size_kwh,
        }
    }
}
