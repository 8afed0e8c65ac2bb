//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::appliances::{
    ApplianceList, ApplianceLoad, ApplianceSpec, DEFAULT_CUSTOM_CATEGORY, MAX_HOURS_PER_DAY,
    MIN_HOURS_PER_DAY,
};
use crate::catalog;
use crate::sizing::types::{InputMode, SizingConfig};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`]
/// for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// How consumption is derived.
    #[serde(default)]
    pub input: InputConfig,
    /// Site and equipment parameters.
    #[serde(default)]
    pub sizing: SizingSection,
    /// Loads used in device mode.
    #[serde(default)]
    pub appliances: Vec<ApplianceEntry>,
    /// Advisory text generator settings.
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

/// Consumption input selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub mode: InputMode,
    /// Monthly electricity bill, read in bill mode.
    pub monthly_bill: f64,
}

/// Site and equipment parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingSection {
    /// Index into the region table; overrides `peak_sun_hours` when set.
    pub region: Option<usize>,
    pub peak_sun_hours: f64,
    pub panel_wattage: u32,
    /// Derating factor in `(0, 1]`.
    pub system_efficiency: f64,
    pub include_battery: bool,
}

impl Default for SizingSection {
    fn default() -> Self {
        let d = SizingConfig::default();
        Self {
            region: None,
            peak_sun_hours: d.peak_sun_hours,
            panel_wattage: d.panel_wattage,
            system_efficiency: d.system_efficiency,
            include_battery: d.include_battery,
        }
    }
}

/// One `[[appliances]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceEntry {
    /// Catalog id, or any id when `name` and `watts` describe a custom load.
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_hours")]
    pub hours_per_day: f64,
    /// Rated power override (W).
    pub watts: Option<f64>,
    pub name: Option<String>,
    pub category: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

fn default_hours() -> f64 {
    crate::appliances::DEFAULT_HOURS_PER_DAY
}

impl ApplianceEntry {
    pub fn catalog(id: &str, quantity: u32, hours_per_day: f64) -> Self {
        Self {
            id: id.to_string(),
            quantity,
            hours_per_day,
            watts: None,
            name: None,
            category: None,
        }
    }
}

/// Advisory text generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorConfig {
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub endpoint: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sizing.peak_sun_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Engine inputs derived from a validated scenario.
#[derive(Debug, Clone)]
pub struct ResolvedScenario {
    pub mode: InputMode,
    pub monthly_bill: f64,
    pub appliances: ApplianceList,
    pub sizing: SizingConfig,
}

impl ScenarioConfig {
    /// Returns the baseline scenario: no loads, default site parameters.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the family-home preset: a typical detached household.
    pub fn family_home() -> Self {
        Self {
            appliances: vec![
                ApplianceEntry::catalog("ac_1hp", 2, 8.0),
                ApplianceEntry::catalog("fridge_side", 1, 24.0),
                ApplianceEntry::catalog("washing_machine", 1, 1.0),
                ApplianceEntry::catalog("tv_led", 1, 5.0),
                ApplianceEntry::catalog("rice_cooker", 1, 1.0),
                ApplianceEntry::catalog("lights_led", 10, 6.0),
                ApplianceEntry::catalog("water_heater", 1, 0.5),
            ],
            ..Self::default()
        }
    }

    /// Returns the apartment preset: small load profile in the north region.
    pub fn apartment() -> Self {
        Self {
            sizing: SizingSection {
                region: Some(0),
                ..SizingSection::default()
            },
            appliances: vec![
                ApplianceEntry::catalog("ac_1hp", 1, 6.0),
                ApplianceEntry::catalog("fridge_small", 1, 24.0),
                ApplianceEntry::catalog("laptop", 1, 8.0),
                ApplianceEntry::catalog("lights_led", 4, 5.0),
            ],
            ..Self::default()
        }
    }

    /// Returns the bill-estimate preset: sized from a 1,000,000 monthly bill with storage.
    pub fn bill_estimate() -> Self {
        Self {
            input: InputConfig {
                mode: InputMode::Bill,
                monthly_bill: 1_000_000.0,
            },
            sizing: SizingSection {
                include_battery: true,
                ..SizingSection::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["family_home", "apartment", "bill_estimate"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "family_home" => Ok(Self::family_home()),
            "apartment" => Ok(Self::apartment()),
            "bill_estimate" => Ok(Self::bill_estimate()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let input = &self.input;
        if !input.monthly_bill.is_finite() || input.monthly_bill < 0.0 {
            errors.push(ConfigError::new("input.monthly_bill", "must be finite and >= 0"));
        }

        let s = &self.sizing;
        match s.region {
            Some(i) if catalog::region(i).is_none() => errors.push(ConfigError::new(
                "sizing.region",
                format!("must be < {}", catalog::REGIONS.len()),
            )),
            Some(_) => {}
            None if !s.peak_sun_hours.is_finite() || s.peak_sun_hours <= 0.0 => {
                errors.push(ConfigError::new("sizing.peak_sun_hours", "must be finite and > 0"));
            }
            None => {}
        }
        if s.panel_wattage == 0 {
            errors.push(ConfigError::new("sizing.panel_wattage", "must be > 0"));
        }
        if s.system_efficiency.is_nan() || s.system_efficiency <= 0.0 || s.system_efficiency > 1.0 {
            errors.push(ConfigError::new(
                "sizing.system_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }

        for (i, a) in self.appliances.iter().enumerate() {
            let path = format!("appliances[{i}]");
            if a.quantity == 0 {
                errors.push(ConfigError::new(format!("{path}.quantity"), "must be >= 1"));
            }
            if !(MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&a.hours_per_day) {
                errors.push(ConfigError::new(
                    format!("{path}.hours_per_day"),
                    format!("must be in [{MIN_HOURS_PER_DAY}, {MAX_HOURS_PER_DAY}]"),
                ));
            }
            if a.watts.is_some_and(|w| !w.is_finite() || w < 0.0) {
                errors.push(ConfigError::new(
                    format!("{path}.watts"),
                    "must be finite and >= 0",
                ));
            }
            if self.appliances[..i].iter().any(|b| b.id == a.id) {
                errors.push(ConfigError::new(
                    format!("{path}.id"),
                    format!("duplicate appliance id \"{}\"", a.id),
                ));
            }
            let custom_ok =
                a.name.as_deref().is_some_and(|n| !n.trim().is_empty()) && a.watts.is_some();
            if catalog::appliance_by_id(&a.id).is_none() && !custom_ok {
                errors.push(ConfigError::new(
                    format!("{path}.id"),
                    format!("unknown catalog id \"{}\" needs name and watts", a.id),
                ));
            }
        }

        errors
    }

    /// Converts the scenario into engine inputs.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, if any.
    pub fn resolve(&self) -> Result<ResolvedScenario, ConfigError> {
        if let Some(e) = self.validate().into_iter().next() {
            return Err(e);
        }

        let s = &self.sizing;
        let peak_sun_hours = s
            .region
            .and_then(catalog::region)
            .map_or(s.peak_sun_hours, |r| r.sun_hours);
        let sizing = SizingConfig {
            peak_sun_hours,
            panel_wattage: s.panel_wattage,
            system_efficiency: s.system_efficiency,
            include_battery: s.include_battery,
        };

        let loads = self
            .appliances
            .iter()
            .map(|a| {
                let spec = catalog::appliance_by_id(&a.id).unwrap_or_else(|| {
                    ApplianceSpec::new(
                        a.id.clone(),
                        a.name.clone().unwrap_or_default(),
                        a.category
                            .clone()
                            .filter(|c| !c.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_CUSTOM_CATEGORY.to_string()),
                        a.watts.unwrap_or(0.0),
                    )
                });
                let mut load = ApplianceLoad::from_spec(&spec);
                if let Some(name) = a.name.clone().filter(|n| !n.trim().is_empty()) {
                    load.name = name;
                }
                if let Some(category) = a.category.clone().filter(|c| !c.trim().is_empty()) {
                    load.category = category;
                }
                load.quantity = a.quantity;
                load.hours_per_day = a.hours_per_day;
                if a.watts.is_some() {
                    load.watts_actual = a.watts;
                }
                load
            })
            .collect();

        Ok(ResolvedScenario {
            mode: self.input.mode,
            monthly_bill: self.input.monthly_bill,
            appliances: ApplianceList::from_loads(loads),
            sizing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert_eq!(e.field, "preset");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[input]
mode = "device"

[sizing]
peak_sun_hours = 5.2
panel_wattage = 550
system_efficiency = 0.85
include_battery = true

[[appliances]]
id = "ac_2hp"
quantity = 2
hours_per_day = 6.0

[[appliances]]
id = "aquarium"
name = "Aquarium pump"
watts = 35.0
hours_per_day = 24.0

[advisor]
model = "custom-model"
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.unwrap();
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.sizing.panel_wattage, 550);
        assert_eq!(cfg.appliances.len(), 2);
        assert_eq!(cfg.appliances[1].quantity, 1);
        assert_eq!(cfg.advisor.model, "custom-model");
        assert_eq!(cfg.advisor.api_key_env, "API_KEY");
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[sizing]
panel_wattage = 450
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let toml = r#"
[input]
mode = "meter"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_bad_efficiency() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.system_efficiency = 1.2;
        assert!(cfg.validate().iter().any(|e| e.field == "sizing.system_efficiency"));
        cfg.sizing.system_efficiency = 0.0;
        assert!(cfg.validate().iter().any(|e| e.field == "sizing.system_efficiency"));
    }

    #[test]
    fn validation_catches_zero_sun_hours_and_panel() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.peak_sun_hours = 0.0;
        cfg.sizing.panel_wattage = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sizing.peak_sun_hours"));
        assert!(errors.iter().any(|e| e.field == "sizing.panel_wattage"));
    }

    #[test]
    fn validation_catches_negative_bill() {
        let mut cfg = ScenarioConfig::bill_estimate();
        cfg.input.monthly_bill = -1.0;
        assert!(cfg.validate().iter().any(|e| e.field == "input.monthly_bill"));
    }

    #[test]
    fn validation_catches_region_out_of_range() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.region = Some(7);
        assert!(cfg.validate().iter().any(|e| e.field == "sizing.region"));
    }

    #[test]
    fn validation_catches_bad_appliance_entries() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.appliances = vec![
            ApplianceEntry::catalog("fan", 0, 30.0),
            ApplianceEntry::catalog("hovercraft", 1, 1.0),
        ];
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances[0].quantity"));
        assert!(errors.iter().any(|e| e.field == "appliances[0].hours_per_day"));
        assert!(errors.iter().any(|e| e.field == "appliances[1].id"));
    }

    #[test]
    fn validation_rejects_infinite_values() {
        let mut cfg = ScenarioConfig::family_home();
        cfg.sizing.region = None;
        cfg.input.monthly_bill = f64::INFINITY;
        cfg.sizing.peak_sun_hours = f64::INFINITY;
        cfg.appliances[0].watts = Some(f64::INFINITY);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "input.monthly_bill"));
        assert!(errors.iter().any(|e| e.field == "sizing.peak_sun_hours"));
        assert!(errors.iter().any(|e| e.field == "appliances[0].watts"));
    }

    #[test]
    fn validation_rejects_duplicate_ids() {
        let toml = r#"
[[appliances]]
id = "fan"

[[appliances]]
id = "fan"
hours_per_day = 8.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "appliances[1].id");
        assert_eq!(cfg.resolve().unwrap_err().field, "appliances[1].id");
    }

    #[test]
    fn resolve_accepts_highest_custom_id() {
        let toml = r#"
[[appliances]]
id = "custom_4294967295"
name = "Pool pump"
watts = 900.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        assert!(cfg.validate().is_empty());
        let mut list = cfg.resolve().unwrap().appliances;
        assert_eq!(list.add_custom("Heater", 800.0, "").as_deref(), Some("custom_0"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::new("sizing.panel_wattage", "must be > 0");
        assert_eq!(e.to_string(), "config error: sizing.panel_wattage: must be > 0");
    }

    #[test]
    fn resolve_applies_region_and_overrides() {
        let mut cfg = ScenarioConfig::apartment();
        cfg.appliances[0].watts = Some(800.0);
        let resolved = cfg.resolve().unwrap();
        assert_eq!(resolved.sizing.peak_sun_hours, 3.8);
        let ac = resolved.appliances.get("ac_1hp").unwrap();
        assert_eq!(ac.effective_watts(), 800.0);
        assert_eq!(ac.default_watts, 750.0);
        assert_eq!(ac.hours_per_day, 6.0);
    }

    #[test]
    fn resolve_builds_custom_loads() {
        let toml = r#"
[[appliances]]
id = "custom_3"
name = "Pool pump"
watts = 900.0
hours_per_day = 2.0
"#;
        let resolved = ScenarioConfig::from_toml_str(toml).unwrap().resolve().unwrap();
        let pool = resolved.appliances.get("custom_3").unwrap();
        assert_eq!(pool.name, "Pool pump");
        assert_eq!(pool.category, DEFAULT_CUSTOM_CATEGORY);
        assert_eq!(pool.daily_energy_wh(), 1800.0);
    }

    #[test]
    fn resolve_rejects_invalid() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.panel_wattage = 0;
        assert_eq!(cfg.resolve().unwrap_err().field, "sizing.panel_wattage");
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[sizing]
panel_wattage = 600
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.sizing.panel_wattage, 600);
        assert_eq!(cfg.sizing.peak_sun_hours, 4.8);
        assert_eq!(cfg.input.mode, InputMode::Device);
        assert!(cfg.appliances.is_empty());
    }
}
