//! DC string and MPPT wiring plan.
//!
//! Panels are wired in series until the inverter's DC voltage limit is
//! reached (with a cold-weather margin on Voc), then split into exactly two
//! strings on independent MPPT inputs. The planner never goes beyond two
//! strings; arrays larger than `2 * max_panels_per_string` are flagged with
//! [`StringDesign::exceeds_input_limit`] instead.

use super::types::{PhaseType, StringBalance, StringDesign};

/// Nominal open-circuit voltage per panel (V).
pub const PANEL_VOC_V: f64 = 50.0;
/// Voc margin for low-temperature operation.
pub const TEMP_SAFETY_FACTOR: f64 = 1.15;

/// Longest series string the inverter accepts.
pub fn max_panels_per_string(phase: PhaseType) -> u32 {
    let n = (phase.max_dc_input_voltage() / (PANEL_VOC_V * TEMP_SAFETY_FACTOR)).floor();
    n as u32
}

fn string_voltage(panels: u32) -> f64 {
    f64::from(panels) * PANEL_VOC_V
}

/// Plans the strings for `number_of_panels` on an inverter of `phase`.
///
/// # Examples
///
/// ```
/// use solar_sizer::sizing::strings::plan_strings;
/// use solar_sizer::sizing::types::{PhaseType, StringBalance};
///
/// let plan = plan_strings(12, PhaseType::SinglePhase);
/// assert_eq!(plan.total_strings, 2);
/// assert_eq!(plan.panels_per_string, 6);
/// assert_eq!(plan.balance, StringBalance::Balanced);
/// ```
pub fn plan_strings(number_of_panels: u32, phase: PhaseType) -> StringDesign {
    let max_per_string = max_panels_per_string(phase);

    if number_of_panels <= max_per_string {
        return StringDesign {
            total_strings: 1,
            panels_per_string: number_of_panels,
            panels_in_smaller_string: 0,
            mppt_inputs_used: 1,
            balance: StringBalance::Single,
            max_panels_per_string: max_per_string,
            string_voltage_v: string_voltage(number_of_panels),
            exceeds_input_limit: false,
            connection_description: format!("1 string x {number_of_panels} panels in series"),
            input_mode_description: "Single MPPT (MPPT 1)".to_string(),
        };
    }

    let larger = number_of_panels.div_ceil(2);
    let smaller = number_of_panels / 2;

    let (balance, connection_description, input_mode_description) = if larger == smaller {
        (
            StringBalance::Balanced,
            format!("2 strings x {larger} panels in series"),
            "2 independent MPPT inputs - parallel balanced (recommended)".to_string(),
        )
    } else {
        (
            StringBalance::Unbalanced,
            format!("2 strings: {larger} + {smaller} panels in series"),
            "2 independent MPPT inputs (independent mode)".to_string(),
        )
    };

    StringDesign {
        total_strings: 2,
        panels_per_string: larger,
        panels_in_smaller_string: smaller,
        mppt_inputs_used: 2,
        balance,
        max_panels_per_string: max_per_string,
        string_voltage_v: string_voltage(larger),
        exceeds_input_limit: larger > max_per_string,
        connection_description,
        input_mode_description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_limits_per_phase() {
        // 550 / 57.5 = 9.56, 1000 / 57.5 = 17.39
        assert_eq!(max_panels_per_string(PhaseType::SinglePhase), 9);
        assert_eq!(max_panels_per_string(PhaseType::ThreePhase), 17);
    }

    #[test]
    fn small_array_is_one_string() {
        let plan = plan_strings(3, PhaseType::SinglePhase);
        assert_eq!(plan.total_strings, 1);
        assert_eq!(plan.panels_per_string, 3);
        assert_eq!(plan.mppt_inputs_used, 1);
        assert_eq!(plan.string_voltage_v, 150.0);
        assert_eq!(plan.balance, StringBalance::Single);
        assert!(!plan.exceeds_input_limit);
    }

    #[test]
    fn limit_is_inclusive() {
        let plan = plan_strings(9, PhaseType::SinglePhase);
        assert_eq!(plan.total_strings, 1);
        assert_eq!(plan.string_voltage_v, 450.0);
    }

    #[test]
    fn twelve_panels_single_phase_split_evenly() {
        let plan = plan_strings(12, PhaseType::SinglePhase);
        assert_eq!(plan.total_strings, 2);
        assert_eq!(plan.panels_per_string, 6);
        assert_eq!(plan.panels_in_smaller_string, 6);
        assert_eq!(plan.balance, StringBalance::Balanced);
        assert_eq!(plan.string_voltage_v, 300.0);
        assert!(plan.input_mode_description.contains("recommended"));
    }

    #[test]
    fn odd_count_is_unbalanced() {
        let plan = plan_strings(13, PhaseType::SinglePhase);
        assert_eq!(plan.panels_per_string, 7);
        assert_eq!(plan.panels_in_smaller_string, 6);
        assert_eq!(plan.balance, StringBalance::Unbalanced);
        assert_eq!(plan.string_voltage_v, 350.0);
        assert!(plan.input_mode_description.contains("independent"));
    }

    #[test]
    fn three_phase_keeps_longer_strings() {
        let plan = plan_strings(12, PhaseType::ThreePhase);
        assert_eq!(plan.total_strings, 1);
        assert_eq!(plan.panels_per_string, 12);
    }

    #[test]
    fn zero_panels_is_empty_single_string() {
        let plan = plan_strings(0, PhaseType::SinglePhase);
        assert_eq!(plan.total_strings, 1);
        assert_eq!(plan.panels_per_string, 0);
        assert_eq!(plan.string_voltage_v, 0.0);
    }

    #[test]
    fn oversized_array_stays_at_two_strings_and_is_flagged() {
        let plan = plan_strings(40, PhaseType::SinglePhase);
        assert_eq!(plan.total_strings, 2);
        assert_eq!(plan.panels_per_string, 20);
        assert!(plan.exceeds_input_limit);
    }

    #[test]
    fn two_string_partition_invariants() {
        for phase in [PhaseType::SinglePhase, PhaseType::ThreePhase] {
            for n in 0..80 {
                let plan = plan_strings(n, phase);
                assert!(plan.total_strings == 1 || plan.total_strings == 2);
                assert_eq!(plan.mppt_inputs_used, plan.total_strings);
                if plan.total_strings == 2 {
                    assert_eq!(plan.panels_per_string + plan.panels_in_smaller_string, n);
                    assert!(plan.panels_per_string >= plan.panels_in_smaller_string);
                } else {
                    assert_eq!(plan.panels_per_string, n);
                }
                assert_eq!(plan, plan_strings(n, phase));
            }
        }
    }
}
