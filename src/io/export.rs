//! CSV export for the appliance load breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::appliances::ApplianceLoad;
use crate::error::SizerError;

/// Column header for the appliance CSV export.
const HEADER: &str = "id,name,category,quantity,watts,hours_per_day,daily_wh";

/// Exports appliance loads to a CSV file at the given path.
///
/// Writes a header row followed by one data row per load in list order.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `loads` - Appliance loads to export
/// * `path` - Output file path
///
/// # Errors
///
/// Returns [`SizerError::Io`] if the file cannot be created and
/// [`SizerError::Csv`] if writing fails.
pub fn export_csv(loads: &[ApplianceLoad], path: &Path) -> Result<(), SizerError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(loads, buf)?;
    Ok(())
}

/// Writes appliance loads as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_csv(loads: &[ApplianceLoad], writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for l in loads {
        wtr.write_record(&[
            l.id.clone(),
            l.name.clone(),
            l.category.clone(),
            l.quantity.to_string(),
            format!("{:.1}", l.effective_watts()),
            format!("{:.2}", l.hours_per_day),
            format!("{:.1}", l.daily_energy_wh()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
