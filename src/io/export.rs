//! Export dashboard views.
//!
//! - the full `DashboardViews` as pretty JSON (what a web front-end would consume)
//! - the per-region table as CSV (easy to consume in spreadsheets)

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::report::DashboardViews;

#[derive(Debug, Serialize)]
struct RegionCsvRow<'a> {
    region: &'a str,
    code: &'a str,
    cases: u64,
    deaths: u64,
    /// Empty when the region has zero cases.
    mortality: Option<f64>,
}

/// Write all views to a JSON file.
pub fn write_views_json(path: &Path, views: &DashboardViews) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, views)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))
}

/// Write per-region totals to a CSV file.
pub fn write_region_csv(path: &Path, views: &DashboardViews) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for t in &views.stacked {
        writer
            .serialize(RegionCsvRow {
                region: &t.region,
                code: t.region_code.unwrap_or(""),
                cases: t.cases,
                deaths: t.deaths,
                mortality: t.mortality().value(),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}
