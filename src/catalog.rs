//! Built-in reference data: appliances, regions, panels, and inverters.

use serde::Serialize;

use crate::appliances::ApplianceSpec;
use crate::sizing::types::{InverterOption, PhaseType};

/// A region with its average peak sun hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub sun_hours: f64,
}

/// A standard panel rating with a representative model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelOption {
    pub watts: u32,
    pub label: &'static str,
}

/// Region selected when none is configured.
pub const DEFAULT_REGION_INDEX: usize = 1;

pub const REGIONS: &[Region] = &[
    Region {
        name: "North (average)",
        sun_hours: 3.8,
    },
    Region {
        name: "Central (average)",
        sun_hours: 4.8,
    },
    Region {
        name: "South (average)",
        sun_hours: 5.2,
    },
];

pub const PANEL_OPTIONS: &[PanelOption] = &[
    PanelOption {
        watts: 450,
        label: "Longi 450W Mono Half-cell",
    },
    PanelOption {
        watts: 475,
        label: "Jinko Tiger Neo 475W",
    },
    PanelOption {
        watts: 540,
        label: "Canadian Solar 540W HiKu6",
    },
    PanelOption {
        watts: 550,
        label: "AE Solar 550W Aurora",
    },
    PanelOption {
        watts: 580,
        label: "Jinko 580W N-Type",
    },
    PanelOption {
        watts: 600,
        label: "Canadian Solar 600W BiHiKu7",
    },
];

// (id, name, category, default watts)
const APPLIANCE_TABLE: &[(&str, &str, &str, f64)] = &[
    ("ac_1hp", "Air conditioner 1 HP", "Cooling", 750.0),
    ("ac_2hp", "Air conditioner 2 HP", "Cooling", 1500.0),
    ("fan", "Electric fan", "Cooling", 60.0),
    ("fridge_small", "Refrigerator (small)", "Household", 150.0),
    ("fridge_side", "Side-by-side refrigerator", "Household", 400.0),
    ("washing_machine", "Washing machine", "Household", 500.0),
    ("tv_led", "LED / Smart TV", "Entertainment", 120.0),
    ("pc", "Desktop computer", "Work", 300.0),
    ("laptop", "Laptop", "Work", 65.0),
    ("rice_cooker", "Rice cooker", "Kitchen", 700.0),
    ("lights_led", "LED lighting", "Lighting", 20.0),
    ("water_heater", "Water heater", "Household", 2500.0),
    ("kettle", "Electric kettle", "Kitchen", 1500.0),
    ("pump", "Water pump", "Household", 750.0),
    ("microwave", "Microwave oven", "Kitchen", 1200.0),
    ("induction_cooker", "Induction cooktop", "Kitchen", 2000.0),
];

// (capacity kW, label, brand, phase)
const INVERTER_TABLE: &[(f64, &str, &str, PhaseType)] = &[
    (3.0, "Growatt MIN 3000TL-X", "Growatt", PhaseType::SinglePhase),
    (3.6, "Solis 3.6kW 1P", "Solis", PhaseType::SinglePhase),
    (5.0, "Huawei SUN2000-5KTL-L1", "Huawei", PhaseType::SinglePhase),
    (5.0, "Deye 5kW Hybrid", "Deye", PhaseType::SinglePhase),
    (6.0, "Solis 6kW 1P", "Solis", PhaseType::SinglePhase),
    (8.0, "Sungrow 8kW 1P", "Sungrow", PhaseType::SinglePhase),
    (10.0, "Growatt MOD 10KTL3-X", "Growatt", PhaseType::ThreePhase),
    (12.0, "Huawei SUN2000-12KTL-M2", "Huawei", PhaseType::ThreePhase),
    (15.0, "Solis 15kW 3P", "Solis", PhaseType::ThreePhase),
    (20.0, "SMA Sunny Tripower 20kW", "SMA", PhaseType::ThreePhase),
    (50.0, "Huawei SUN2000-50KTL-M0", "Huawei", PhaseType::ThreePhase),
];

/// The appliance catalog used to seed new loads.
pub fn appliances() -> Vec<ApplianceSpec> {
    APPLIANCE_TABLE
        .iter()
        .map(|&(id, name, category, watts)| ApplianceSpec::new(id, name, category, watts))
        .collect()
}

/// Looks up a catalog appliance by id.
pub fn appliance_by_id(id: &str) -> Option<ApplianceSpec> {
    APPLIANCE_TABLE
        .iter()
        .find(|(entry_id, ..)| *entry_id == id)
        .map(|&(id, name, category, watts)| ApplianceSpec::new(id, name, category, watts))
}

/// Catalog appliances whose name or category contains `term` (case-insensitive).
pub fn search_appliances(term: &str) -> Vec<ApplianceSpec> {
    let needle = term.to_lowercase();
    appliances()
        .into_iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle) || a.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The inverter catalog, ordered by ascending capacity.
pub fn inverters() -> Vec<InverterOption> {
    INVERTER_TABLE
        .iter()
        .map(|&(cap, label, brand, phase)| InverterOption::new(cap, label, brand, phase))
        .collect()
}

pub fn region(index: usize) -> Option<&'static Region> {
    REGIONS.get(index)
}

/// Model label for a panel rating, or a generic `"{W}W Mono Panel"`.
pub fn panel_label(watts: u32) -> String {
    PANEL_OPTIONS
        .iter()
        .find(|p| p.watts == watts)
        .map_or_else(|| format!("{watts}W Mono Panel"), |p| p.label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverter_catalog_is_ascending() {
        let inv = inverters();
        assert_eq!(inv.len(), 11);
        assert!(inv.windows(2).all(|w| w[0].capacity_kw <= w[1].capacity_kw));
    }

    #[test]
    fn appliance_ids_are_unique() {
        let apps = appliances();
        for (i, a) in apps.iter().enumerate() {
            assert!(apps[i + 1..].iter().all(|b| b.id != a.id), "duplicate id {}", a.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let ac = appliance_by_id("ac_1hp");
        assert_eq!(ac.as_ref().map(|a| a.default_watts), Some(750.0));
        assert!(appliance_by_id("toaster").is_none());
    }

    #[test]
    fn search_matches_name_and_category() {
        assert_eq!(search_appliances("kitchen").len(), 4);
        assert!(search_appliances("FRIDGE").is_empty());
        assert_eq!(search_appliances("refrigerator").len(), 2);
    }

    #[test]
    fn default_region_is_central() {
        assert_eq!(region(DEFAULT_REGION_INDEX).map(|r| r.sun_hours), Some(4.8));
        assert!(region(3).is_none());
    }

    #[test]
    fn panel_label_falls_back_to_generic() {
        assert_eq!(panel_label(550), "AE Solar 550W Aurora");
        assert_eq!(panel_label(410), "410W Mono Panel");
    }
}
