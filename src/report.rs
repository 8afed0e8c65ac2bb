//! Consultation report assembled from a sizing result.

use std::fmt;

use serde::Serialize;

use crate::appliances::{ApplianceLoad, CategoryShare, category_breakdown};
use crate::catalog;
use crate::design::TechnicianSheet;
use crate::sizing::consumption::AVERAGE_UNIT_PRICE_PER_KWH;
use crate::sizing::types::{CalculationResult, SizingConfig};

/// Unit prices the monthly bill is compared at (per kWh).
pub const COMPARISON_PRICES: [f64; 3] = [2000.0, 2500.0, 3000.0];

/// Monthly bill at one unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostPoint {
    pub price_per_kwh: f64,
    pub monthly_cost: f64,
}

/// Everything the presentation layer shows after a calculation.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationReport {
    pub result: CalculationResult,
    pub panel_label: String,
    pub peak_sun_hours: f64,
    pub categories: Vec<CategoryShare>,
    pub daily_consumption_kwh: f64,
    pub daily_production_kwh: f64,
    pub cost_comparison: Vec<CostPoint>,
    /// Value of one month of production at the average unit price.
    pub estimated_monthly_savings: f64,
    pub technician: TechnicianSheet,
    /// Free-text advice, when it was requested.
    pub advice: Option<String>,
}

impl ConsultationReport {
    /// Builds the report for `result` computed from `loads` and `config`.
    pub fn build(
        loads: &[ApplianceLoad],
        config: &SizingConfig,
        result: &CalculationResult,
    ) -> Self {
        let monthly_kwh = result.monthly_consumption_kwh;
        let cost_comparison = COMPARISON_PRICES
            .iter()
            .map(|&price| CostPoint {
                price_per_kwh: price,
                monthly_cost: (monthly_kwh * price).round(),
            })
            .collect();

        Self {
            result: result.clone(),
            panel_label: catalog::panel_label(config.panel_wattage),
            peak_sun_hours: config.peak_sun_hours,
            categories: category_breakdown(loads),
            daily_consumption_kwh: result.daily_consumption_kwh(),
            daily_production_kwh: result.estimated_daily_production_kwh,
            cost_comparison,
            estimated_monthly_savings: result.estimated_daily_production_kwh
                * 30.0
                * AVERAGE_UNIT_PRICE_PER_KWH,
            technician: TechnicianSheet::from_result(result),
            advice: None,
        }
    }

    pub fn with_advice(mut self, advice: String) -> Self {
        self.advice = Some(advice);
        self
    }
}

impl fmt::Display for ConsultationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "=== Solar Consultation Report ===")?;
        writeln!(f, "Peak sun hours:        {:.1} h", self.peak_sun_hours)?;
        writeln!(f, "Panel model:           {}", self.panel_label)?;
        writeln!(f, "Daily consumption:     {:.2} kWh", self.daily_consumption_kwh)?;
        writeln!(f, "Monthly consumption:   {:.1} kWh", r.monthly_consumption_kwh)?;
        writeln!(f, "Required system size:  {:.1} kWp", r.required_system_size_kwp)?;
        writeln!(f, "Number of panels:      {}", r.number_of_panels)?;
        writeln!(f, "Daily production:      {:.1} kWh", self.daily_production_kwh)?;
        match &r.recommended_inverter {
            Some(inv) => writeln!(
                f,
                "Inverter:              {} ({} kW, {})",
                inv.label, inv.capacity_kw, inv.phase_type
            )?,
            None => writeln!(f, "Inverter:              not yet determined")?,
        }
        if let Some(kwh) = r.recommended_battery_size_kwh {
            writeln!(f, "Battery:               {kwh:.1} kWh")?;
        }
        writeln!(f, "Monthly savings:       {:.0} VND", self.estimated_monthly_savings)?;

        if !self.categories.is_empty() {
            writeln!(f, "\n--- Consumption by category ---")?;
            for share in &self.categories {
                writeln!(f, "{:<22} {:.0} Wh/day", share.category, share.daily_wh)?;
            }
        }

        writeln!(f, "\n--- Monthly bill comparison ---")?;
        for point in &self.cost_comparison {
            writeln!(
                f,
                "At {:>5.0} VND/kWh:     {:.0} VND",
                point.price_per_kwh, point.monthly_cost
            )?;
        }

        let t = &self.technician;
        let d = &r.string_design;
        writeln!(f, "\n--- Technical design ---")?;
        writeln!(f, "String layout:         {}", d.connection_description)?;
        writeln!(f, "Input mode:            {}", d.input_mode_description)?;
        writeln!(f, "String count:          {}", t.total_strings)?;
        writeln!(f, "String Voc:            {:.1} V", t.string_voc_v)?;
        writeln!(f, "String Vmp:            {:.1} V", t.string_vmp_v)?;
        writeln!(f, "String Isc:            {:.1} A", t.string_isc_a)?;
        writeln!(f, "Grid connection:       {}", t.grid_connection)?;
        writeln!(f, "DC cable:              {}", t.dc_cable)?;
        writeln!(f, "AC cable:              {}", t.ac_cable)?;
        write!(f, "Breaker:               {}", t.breaker)?;
        if d.exceeds_input_limit {
            write!(
                f,
                "\nWarning:               strings exceed {} panels per MPPT input",
                d.max_panels_per_string
            )?;
        }

        if let Some(advice) = &self.advice {
            write!(f, "\n\n--- Advisory ---\n{advice}")?;
        }
        Ok(())
    }
}
