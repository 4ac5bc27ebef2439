//! CSV ingest and typing.
//!
//! Turns a `date,state,cases,deaths` CSV (extra columns allowed) into typed
//! `Observation`s.
//!
//! Design goals:
//! - **Strict schema** for required columns (the source is rejected as a whole)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no enrichment or aggregation here

use std::collections::HashMap;
use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::Observation;

/// A row-level typing failure encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the CSV (header is line 1).
    pub line: usize,
    /// Column that failed, when the failure is column-specific.
    pub column: Option<&'static str>,
    pub message: String,
}

/// Ingest output: typed rows plus per-row failures.
#[derive(Debug, Clone)]
pub struct ParsedRows {
    pub observations: Vec<Observation>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Accepted spellings for the region column.
const REGION_COLUMNS: [&str; 2] = ["state", "region"];

/// Parse a CSV stream into observations.
///
/// Errors are returned only for schema-level problems (unreadable header,
/// missing required columns); row problems are collected in `row_errors`.
pub fn parse_observations<R: Read>(reader: R) -> Result<ParsedRows, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read CSV headers: {e}"))?
        .clone();

    let header_map = build_header_map(&headers);
    let columns = resolve_columns(&header_map)?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    column: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(obs) => observations.push(obs),
            Err((column, message)) => row_errors.push(RowError {
                line,
                column: Some(column),
                message,
            }),
        }
    }

    Ok(ParsedRows {
        observations,
        row_errors,
        rows_read,
    })
}

/// Column indices for the four required fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    region: usize,
    cases: usize,
    deaths: usize,
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, String> {
    let required = |name: &str| {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| format!("missing required column: `{name}`"))
    };

    let region = REGION_COLUMNS
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| "missing required column: `state` (or `region`)".to_string())?;

    Ok(Columns {
        date: required("date")?,
        region,
        cases: required("cases")?,
        deaths: required("deaths")?,
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<Observation, (&'static str, String)> {
    let region = get_required(record, columns.region).ok_or(("state", "missing region name".to_string()))?;
    let date_raw = get_required(record, columns.date).ok_or(("date", "missing date".to_string()))?;
    let date = parse_date(date_raw).map_err(|e| ("date", e))?;

    let cases_raw = get_required(record, columns.cases).ok_or(("cases", "missing cases".to_string()))?;
    let cases = parse_count(cases_raw).map_err(|e| ("cases", e))?;

    let deaths_raw = get_required(record, columns.deaths).ok_or(("deaths", "missing deaths".to_string()))?;
    let deaths = parse_count(deaths_raw).map_err(|e| ("deaths", e))?;

    Ok(Observation {
        region: region.to_string(),
        date,
        cases,
        deaths,
    })
}

fn get_required(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a calendar date.
///
/// ISO dates are the norm for this dataset, but re-saved exports often carry
/// a time component or US-style dates.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!(
        "invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY."
    ))
}

/// Parse a non-negative integer count.
///
/// Accepts an integral float rendering such as `"12.0"`, which pandas emits
/// for columns that once held a missing value.
pub fn parse_count(s: &str) -> Result<u64, String> {
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 => Ok(v as u64),
        Ok(v) if v < 0.0 => Err(format!("negative count '{s}'")),
        _ => Err(format!("invalid count '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_collects_typing_failures() {
        let csv = "date,state,fips,cases,deaths\n\
                   2020-03-01,New York,36,10,1\n\
                   2020-03-02,New York,36,abc,1\n\
                   not-a-date,Texas,48,5,0\n\
                   2020-03-02,Texas,48,7,-1\n\
                   2020-03-03,Texas,48,9.0,0\n";
        let parsed = parse_observations(csv.as_bytes()).unwrap();

        assert_eq!(parsed.rows_read, 5);
        assert_eq!(parsed.observations.len(), 2);
        assert_eq!(parsed.observations[1].cases, 9);

        let cols: Vec<_> = parsed.row_errors.iter().map(|e| (e.line, e.column)).collect();
        assert_eq!(cols, vec![(3, Some("cases")), (4, Some("date")), (5, Some("deaths"))]);
    }

    #[test]
    fn missing_required_column_rejects_source() {
        let csv = "date,state,cases\n2020-03-01,Ohio,1\n";
        let err = parse_observations(csv.as_bytes()).unwrap_err();
        assert!(err.contains("deaths"));
    }

    #[test]
    fn header_names_are_normalized() {
        let csv = "\u{feff}Date,Region,CASES,Deaths\n2020-03-01,Ohio,3,0\n";
        let parsed = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(parsed.observations.len(), 1);
        assert_eq!(parsed.observations[0].region, "Ohio");
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2020, 12, 5).unwrap();
        assert_eq!(parse_date("2020-12-05").unwrap(), d);
        assert_eq!(parse_date("12/05/2020").unwrap(), d);
        assert_eq!(parse_date("2020-12-05T00:00:00").unwrap(), d);
        assert!(parse_date("05.12.2020").is_err());
    }

    #[test]
    fn counts_beyond_u64_are_rejected() {
        assert_eq!(parse_count("12.0").unwrap(), 12);
        assert_eq!(parse_count("18446744073709551615").unwrap(), u64::MAX);
        assert!(parse_count("18446744073709551616.0").is_err());
        assert!(parse_count("1e30").is_err());
        assert!(parse_count("-3").unwrap_err().contains("negative"));
    }
}
