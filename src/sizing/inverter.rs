//! Inverter selection against the DC array size.

use tracing::warn;

use super::types::InverterOption;

/// Minimum inverter capacity as a fraction of the DC nameplate (kWp).
pub const DC_AC_SIZING_RATIO: f64 = 0.85;

/// Picks the smallest inverter with `capacity >= 0.85 * required_kwp`.
///
/// `catalog` must be ordered by ascending capacity; the first sufficient entry
/// wins. Falls back to the last (largest) entry when none is large enough, and
/// returns `None` only for an empty catalog.
pub fn select_inverter(required_kwp: f64, catalog: &[InverterOption]) -> Option<&InverterOption> {
    let threshold = required_kwp * DC_AC_SIZING_RATIO;
    if let Some(inv) = catalog.iter().find(|inv| inv.capacity_kw >= threshold) {
        return Some(inv);
    }
    let largest = catalog.last()?;
    warn!(
        "required size {:.1} kWp exceeds inverter catalog, falling back to {} ({} kW)",
        required_kwp, largest.label, largest.capacity_kw
    );
    Some(largest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::sizing::types::PhaseType;

    #[test]
    fn smallest_sufficient_inverter_wins() {
        let inverters = catalog::inverters();
        // 0.85 * 1.4 = 1.19 -> 3 kW is the first entry
        let inv = select_inverter(1.4, &inverters);
        assert_eq!(inv.map(|i| i.capacity_kw), Some(3.0));

        // 0.85 * 5.0 = 4.25 -> first 5 kW entry (Huawei) beats the Deye tie
        let inv = select_inverter(5.0, &inverters);
        assert_eq!(inv.map(|i| i.capacity_kw), Some(5.0));
        assert_eq!(inv.map(|i| i.brand.as_str()), Some("Huawei"));
    }

    #[test]
    fn boundary_is_inclusive() {
        let catalog = vec![
            InverterOption::new(3.4, "A", "a", PhaseType::SinglePhase),
            InverterOption::new(6.0, "B", "b", PhaseType::SinglePhase),
        ];
        // 0.85 * 4.0 = 3.4
        assert_eq!(select_inverter(4.0, &catalog).map(|i| i.label.as_str()), Some("A"));
    }

    #[test]
    fn oversized_array_falls_back_to_largest() {
        let inverters = catalog::inverters();
        let inv = select_inverter(100.0, &inverters);
        assert_eq!(inv.map(|i| i.capacity_kw), Some(50.0));
    }

    #[test]
    fn empty_catalog_yields_none() {
        assert!(select_inverter(2.0, &[]).is_none());
    }

    #[test]
    fn selected_capacity_satisfies_ratio() {
        let inverters = catalog::inverters();
        let mut kwp = 0.0;
        while kwp < 58.0 {
            kwp += 0.1;
            let inv = select_inverter(kwp, &inverters);
            let cap = inv.map_or(0.0, |i| i.capacity_kw);
            assert!(cap >= kwp * DC_AC_SIZING_RATIO, "{cap} kW too small for {kwp} kWp");
        }
    }
}
