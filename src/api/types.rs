//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::appliances::{ApplianceLoad, ApplianceSpec};
use crate::catalog::{PanelOption, Region};
use crate::config::{ApplianceEntry, InputConfig, ScenarioConfig, SizingSection};
use crate::sizing::types::{CalculationResult, InputMode, InverterOption, SizingConfig};

/// Scenario the server was started with, and its result.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub mode: InputMode,
    pub monthly_bill: f64,
    pub config: SizingConfig,
    pub appliances: Vec<ApplianceLoad>,
    pub result: CalculationResult,
}

/// Body of `POST /sizing`.
///
/// Uses the same shapes as the `[input]`, `[sizing]`, and `[[appliances]]`
/// scenario sections, so catalog ids resolve the same way.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingRequest {
    pub mode: InputMode,
    pub monthly_bill: f64,
    pub config: SizingSection,
    pub appliances: Vec<ApplianceEntry>,
}

impl SizingRequest {
    /// The equivalent scenario configuration.
    pub fn into_scenario(self) -> ScenarioConfig {
        ScenarioConfig {
            input: InputConfig {
                mode: self.mode,
                monthly_bill: self.monthly_bill,
            },
            sizing: self.config,
            appliances: self.appliances,
            ..ScenarioConfig::default()
        }
    }
}

/// Reference data exposed by `GET /catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub appliances: Vec<ApplianceSpec>,
    pub regions: &'static [Region],
    pub panels: &'static [PanelOption],
    pub inverters: Vec<InverterOption>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Dotted path of the offending field, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
