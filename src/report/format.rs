//! Plain-text rendering of the dashboard views.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized

use num_format::{Locale, ToFormattedString};

use crate::domain::{Metric, Ratio};
use crate::io::loader::LoadReport;
use crate::prep::EnrichedDataset;
use crate::report::views::{DashboardViews, MapEntry};

/// How many row errors to list individually before summarizing.
const ROW_ERROR_PREVIEW: usize = 5;

/// Format the whole summary: metrics, region tables, rankings, race, diagnostics.
pub fn format_summary(views: &DashboardViews, dataset: &EnrichedDataset, load: &LoadReport) -> String {
    let mut out = String::new();

    out.push_str("=== odash - outbreak dashboard ===\n");
    out.push_str(&format!("Source: {}\n", load.origin));
    out.push_str(&format!("Dates: {} .. {}\n", views.date_from, views.date_to));
    let regions = if views.regions.is_empty() {
        "all".to_string()
    } else {
        views.regions.join(", ")
    };
    out.push_str(&format!("Regions: {regions}\n"));
    out.push_str(&format!("Top N: {}\n\n", views.top_n));

    out.push_str(&format_metrics(views));
    out.push('\n');

    for metric in Metric::ALL {
        let entries = match metric {
            Metric::Cases => &views.cases_map,
            Metric::Deaths => &views.deaths_map,
        };
        out.push_str(&format!("Map, {} by region code:\n", metric.display_name()));
        out.push_str(&format_map(entries));
        out.push('\n');
    }

    out.push_str(&format!("Top {} regions by cases (full period):\n", views.top_n));
    for s in &views.top_cases_share {
        out.push_str(&format!(
            "{:<24} {:>14} {:>8}\n",
            truncate(&s.region, 24),
            fmt_count(s.value),
            fmt_pct(s.share)
        ));
    }
    out.push_str(&format!("{:<24} {:>14}\n\n", "Total", fmt_count(views.top_cases_total)));

    out.push_str("Cases and deaths by region:\n");
    out.push_str(&format!(
        "{:<24} {:>14} {:>12} {:>10}\n",
        "region", "cases", "deaths", "mortality"
    ));
    out.push_str(&format!("{:-<24} {:-<14} {:-<12} {:-<10}\n", "", "", "", ""));
    for t in &views.stacked {
        out.push_str(&format!(
            "{:<24} {:>14} {:>12} {:>10}\n",
            truncate(&t.region, 24),
            fmt_count(t.cases),
            fmt_count(t.deaths),
            fmt_ratio(t.mortality())
        ));
    }
    out.push('\n');

    out.push_str(&format!("Top {} regions by mortality:\n", views.top_n));
    for r in &views.mortality_top {
        out.push_str(&format!("{:<24} {:>10}\n", truncate(&r.region, 24), fmt_pct(r.mortality)));
    }
    if !views.mortality_undefined.is_empty() {
        out.push_str(&format!("  (no data: {})\n", views.mortality_undefined.join(", ")));
    }
    out.push('\n');

    if let Some(last) = views.race.frames.last() {
        out.push_str(&format!("Cumulative deaths race, final frame ({}):\n", last.date));
        for (region, value) in views.race.regions.iter().zip(&last.values) {
            out.push_str(&format!("{:<24} {:>14}\n", truncate(region, 24), fmt_count(*value)));
        }
        out.push('\n');
    }

    out.push_str(&format_diagnostics(views, dataset, load));
    out
}

/// The three headline metrics.
pub fn format_metrics(views: &DashboardViews) -> String {
    let m = &views.metrics;
    format!(
        "Total cases:    {:>14}\nTotal deaths:   {:>14}\nMortality rate: {:>14}\n",
        fmt_count(m.total_cases),
        fmt_count(m.total_deaths),
        fmt_pct(m.overall_mortality)
    )
}

fn format_map(entries: &[MapEntry]) -> String {
    if entries.is_empty() {
        return "(no rows)\n".to_string();
    }
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!("{:<4} {:<24} {:>14}\n", e.code, truncate(&e.region, 24), fmt_count(e.value)));
    }
    out
}

fn format_diagnostics(views: &DashboardViews, dataset: &EnrichedDataset, load: &LoadReport) -> String {
    let mut out = String::new();
    out.push_str("Diagnostics:\n");
    out.push_str(&format!(
        "- rows: read={} used={} rejected={}\n",
        fmt_count(load.rows_read as u64),
        fmt_count(load.rows_used as u64),
        fmt_count(load.row_errors.len() as u64)
    ));
    for e in load.row_errors.iter().take(ROW_ERROR_PREVIEW) {
        let column = e.column.unwrap_or("-");
        out.push_str(&format!("  line {} [{column}]: {}\n", e.line, e.message));
    }
    if load.row_errors.len() > ROW_ERROR_PREVIEW {
        out.push_str(&format!("  ... {} more\n", load.row_errors.len() - ROW_ERROR_PREVIEW));
    }
    if dataset.excluded_rows > 0 {
        out.push_str(&format!(
            "- territory rows excluded: {}\n",
            fmt_count(dataset.excluded_rows as u64)
        ));
    }
    if !dataset.unrecognized_regions.is_empty() {
        let names: Vec<&str> = dataset.unrecognized_regions.iter().map(String::as_str).collect();
        out.push_str(&format!("- unrecognized regions: {}\n", names.join(", ")));
    }
    if !views.unmapped_regions.is_empty() {
        out.push_str(&format!(
            "- left out of maps (no region code): {}\n",
            views.unmapped_regions.join(", ")
        ));
    }
    out
}

/// Integer with thousands separators (`1,234,567`).
pub fn fmt_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Fraction as a percentage with two decimals.
pub fn fmt_pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Percentage, or an em dash when the ratio is undefined.
pub fn fmt_ratio(ratio: Ratio) -> String {
    match ratio {
        Ratio::Value(v) => fmt_pct(v),
        Ratio::Undefined => "—".to_string(),
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::OverallMetrics;

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_count(1234567), "1,234,567");
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_pct(7.0 / 150.0), "4.67%");
        assert_eq!(fmt_ratio(Ratio::Undefined), "—");
        assert_eq!(fmt_ratio(Ratio::Value(0.1)), "10.00%");
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Ohio", 10), "Ohio");
        assert_eq!(truncate("North Carolina", 6), "North.");
    }

    #[test]
    fn metrics_block() {
        let views = DashboardViews {
            date_from: chrono::NaiveDate::from_ymd_opt(2020, 1, 21).unwrap(),
            date_to: chrono::NaiveDate::from_ymd_opt(2020, 12, 5).unwrap(),
            regions: Vec::new(),
            top_n: 6,
            metrics: OverallMetrics {
                total_cases: 150,
                total_deaths: 7,
                overall_mortality: 7.0 / 150.0,
            },
            cases_map: Vec::new(),
            deaths_map: Vec::new(),
            unmapped_regions: Vec::new(),
            top_cases_share: Vec::new(),
            top_cases_total: 0,
            stacked: Vec::new(),
            timeline: Vec::new(),
            race: Default::default(),
            mortality_top: Vec::new(),
            mortality_undefined: Vec::new(),
            scatter: Vec::new(),
        };
        let txt = format_metrics(&views);
        assert!(txt.contains("Total cases:               150"));
        assert!(txt.contains("4.67%"));
    }

    #[test]
    fn summary_lists_maps_rankings_and_diagnostics() {
        use crate::io::loader::{DataOrigin, from_reader};
        use crate::prep::{FilterCriteria, enrich, filter};
        use crate::report::build_views;

        let csv = "date,state,cases,deaths\n2020-05-01,Ohio,1500,30\n2020-05-01,Guam,4,0\n\
                   2020-05-01,Atlantis,10,0\n2020-05-02,Iowa,x,1\n";
        let loaded = from_reader(csv.as_bytes(), DataOrigin::Remote("mirror".to_string())).unwrap();
        let dataset = enrich(loaded.observations);
        let (lo, hi) = dataset.date_bounds().unwrap();
        let criteria = FilterCriteria::new(lo, hi, Vec::<String>::new()).unwrap();
        let rows = filter(&dataset, &criteria);
        let views = build_views(&dataset, &rows, &criteria, crate::domain::TopN::default());

        let txt = format_summary(&views, &dataset, &loaded.report);
        assert!(txt.contains("Source: mirror"));
        assert!(txt.contains("Map, cases by region code:\nOH   Ohio"));
        assert!(txt.contains("1,500"));
        assert!(txt.contains("- rows: read=4 used=3 rejected=1"));
        assert!(txt.contains("[cases]"));
        assert!(txt.contains("- territory rows excluded: 1"));
        assert!(txt.contains("- left out of maps (no region code): Atlantis"));
    }
}
