//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analytics::Report;
use crate::error::Result;

/// Writes an analytics report to a pretty-printed JSON file.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = report_to_json(report)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts an analytics report to pretty-printed JSON.
pub fn report_to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
