//! Free-text consultation advice from an external text generator.
//!
//! The generator is a collaborator behind [`AdvisoryTextGenerator`]. Its
//! output only decorates the report: [`consult`] never fails and never
//! changes the numeric sizing result.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::appliances::ApplianceLoad;
use crate::error::AdvisoryError;
use crate::sizing::types::{CalculationResult, SizingConfig};

#[cfg(feature = "advisor")]
pub mod gemini;

/// Returned when no API key is available.
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Error: API key not configured. Set the API key environment variable and try again.";
/// Returned when the generator answered with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Sorry, could not generate a consultation right now.";
/// Returned for any transport or service failure.
pub const SERVICE_ERROR_MESSAGE: &str =
    "An error occurred while trying to reach the advisory service. Please try again later.";

/// Inputs the advice is generated from.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryRequest<'a> {
    pub loads: &'a [ApplianceLoad],
    pub config: &'a SizingConfig,
    pub result: &'a CalculationResult,
}

/// Produces free text from a prompt.
#[async_trait]
pub trait AdvisoryTextGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`AdvisoryError`] when no text could be produced.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError>;
}

/// Builds the consultation prompt for `request`.
pub fn build_prompt(request: &AdvisoryRequest<'_>) -> String {
    Prompt(request).to_string()
}

struct Prompt<'r, 'a>(&'r AdvisoryRequest<'a>);

impl fmt::Display for Prompt<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let AdvisoryRequest {
            loads,
            config,
            result,
        } = *self.0;
        let inverter = result.recommended_inverter.as_ref().map_or_else(
            || "Not yet determined".to_string(),
            |inv| format!("{} ({})", inv.label, inv.phase_type),
        );

        writeln!(
            f,
            "You are an expert solar energy consultant. Analyse the customer's electricity \
             consumption and write a professional consultation report."
        )?;
        writeln!(f, "\nCustomer data:")?;
        writeln!(f, "- Region: {} peak sun hours per day.", config.peak_sun_hours)?;
        writeln!(f, "- Planned panel type: {}W.", config.panel_wattage)?;
        writeln!(
            f,
            "- Expected consumption: {:.2} kWh/day.",
            result.daily_consumption_kwh()
        )?;
        writeln!(f, "\nProposed system:")?;
        writeln!(f, "- System size: {} kWp.", result.required_system_size_kwp)?;
        writeln!(f, "- Number of panels: {}.", result.number_of_panels)?;
        writeln!(f, "- Recommended inverter: {inverter}.")?;
        writeln!(f, "\nAppliances in the household:")?;
        for load in loads {
            writeln!(
                f,
                "- {} (x{}): {}W, {}h/day -> total {:.0} Wh",
                load.name,
                load.quantity,
                load.effective_watts(),
                load.hours_per_day,
                load.daily_energy_wh()
            )?;
        }
        writeln!(f, "\nRequired output (Markdown):")?;
        writeln!(
            f,
            "1. **Demand assessment**: comment briefly on the consumption level and name the \
             appliances that use the most energy."
        )?;
        writeln!(
            f,
            "2. **System assessment**: is a {} kWp system sufficient, and does the {inverter} \
             inverter suit the household?",
            result.required_system_size_kwp
        )?;
        writeln!(
            f,
            "3. **Economic benefit**: estimate the monthly savings (about 2,500 per kWh) and a \
             rough payback period."
        )?;
        writeln!(
            f,
            "4. **Installation advice**: panel orientation, cleaning, and electrical safety."
        )
    }
}

/// Generates advice for `request`, mapping every failure to a fixed message.
pub async fn consult(
    generator: &dyn AdvisoryTextGenerator,
    request: &AdvisoryRequest<'_>,
) -> String {
    let prompt = build_prompt(request);
    debug!("advisory prompt is {} bytes", prompt.len());

    match generator.generate(&prompt).await {
        Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
        Ok(text) => text,
        Err(AdvisoryError::MissingCredentials(var)) => {
            error!("advisory skipped: {var} is not set");
            MISSING_CREDENTIALS_MESSAGE.to_string()
        }
        Err(AdvisoryError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
        Err(e) => {
            error!("advisory request failed: {e}");
            SERVICE_ERROR_MESSAGE.to_string()
        }
    }
}
