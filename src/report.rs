//! Result reporting

use crate::error::Result;
use crate::types::prediction::PredictionReport;
use std::io::Write;

/// Heading printed above the JSON record
pub const REPORT_HEADING: &str = "Prediction result:";

/// Write the heading followed by the record as 2-space indented JSON
pub fn write_report<W: Write>(out: &mut W, report: &PredictionReport) -> Result<()> {
    writeln!(out, "{REPORT_HEADING}")?;
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
