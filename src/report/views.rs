//! Chart inputs for the presentation layer.
//!
//! `DashboardViews` is everything a renderer needs for one filter state. It is
//! plain data (serializable) so the text report, the TUI, and the JSON export
//! all consume the same thing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{EnrichedObservation, Metric, RACE_REGIONS, TopN};
use crate::prep::{EnrichedDataset, FilterCriteria};
use crate::stats::{
    self, BarRace, DailyTotals, OverallMetrics, RegionTotals, bar_race, cumulative_by_region_over_time,
    mortality_rate, overall_metrics, region_totals, sum_by_date, sum_by_region, top_mortality,
};

/// A choropleth cell: region code and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub code: &'static str,
    pub region: String,
    pub value: u64,
}

/// A donut slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub region: String,
    pub value: u64,
    /// Fraction of the top-N total (0..=1).
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRatio {
    pub region: String,
    pub mortality: f64,
}

/// One scatter point (x = cases, y = deaths).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub region: String,
    pub cases: u64,
    pub deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// Active allow-list, sorted; empty means all regions.
    pub regions: Vec<String>,
    pub top_n: usize,

    pub metrics: OverallMetrics,

    /// Region-code keyed; regions without a code are listed in `unmapped_regions`.
    pub cases_map: Vec<MapEntry>,
    pub deaths_map: Vec<MapEntry>,
    pub unmapped_regions: Vec<String>,

    /// Top-N regions by cases over the full period (ignores the filter).
    pub top_cases_share: Vec<ShareEntry>,
    pub top_cases_total: u64,

    pub stacked: Vec<RegionTotals>,
    pub timeline: Vec<DailyTotals>,

    /// Cumulative deaths race over the full dataset.
    pub race: BarRace,

    pub mortality_top: Vec<RankedRatio>,
    /// Regions in the filtered subset with zero total cases.
    pub mortality_undefined: Vec<String>,

    pub scatter: Vec<ScatterPoint>,
}

/// Compute every view for one filter state.
///
/// `filtered` must be the result of applying `criteria` to `dataset`.
pub fn build_views(
    dataset: &EnrichedDataset,
    filtered: &[EnrichedObservation],
    criteria: &FilterCriteria,
    top_n: TopN,
) -> DashboardViews {
    let totals = region_totals(filtered);

    let (cases_map, deaths_map, unmapped_regions) = map_entries(&totals);

    let full_cases = sum_by_region(&dataset.rows, Metric::Cases);
    let top_cases = stats::top_n(&full_cases, top_n.get());
    let top_cases_total = top_cases.iter().fold(0u64, |acc, (_, v)| acc.saturating_add(*v));
    let top_cases_share = top_cases
        .into_iter()
        .map(|(region, value)| ShareEntry {
            share: if top_cases_total == 0 {
                0.0
            } else {
                value as f64 / top_cases_total as f64
            },
            region,
            value,
        })
        .collect();

    let race = bar_race(
        &cumulative_by_region_over_time(&dataset.rows, Metric::Deaths),
        RACE_REGIONS,
    );

    let rates = mortality_rate(filtered);
    let mortality_undefined = rates
        .iter()
        .filter(|(_, r)| r.is_undefined())
        .map(|(region, _)| region.clone())
        .collect();
    let mortality_top = top_mortality(&rates, top_n.get())
        .into_iter()
        .map(|(region, mortality)| RankedRatio { region, mortality })
        .collect();

    let scatter = totals
        .iter()
        .map(|t| ScatterPoint {
            region: t.region.clone(),
            cases: t.cases,
            deaths: t.deaths,
        })
        .collect();

    let mut regions: Vec<String> = criteria.region_allowlist().iter().cloned().collect();
    regions.sort();

    DashboardViews {
        date_from: criteria.date_from(),
        date_to: criteria.date_to(),
        regions,
        top_n: top_n.get(),
        metrics: overall_metrics(filtered),
        cases_map,
        deaths_map,
        unmapped_regions,
        top_cases_share,
        top_cases_total,
        stacked: totals,
        timeline: sum_by_date(filtered),
        race,
        mortality_top,
        mortality_undefined,
        scatter,
    }
}

fn map_entries(totals: &[RegionTotals]) -> (Vec<MapEntry>, Vec<MapEntry>, Vec<String>) {
    let mut cases = Vec::new();
    let mut deaths = Vec::new();
    let mut unmapped = Vec::new();
    for t in totals {
        let Some(code) = t.region_code else {
            unmapped.push(t.region.clone());
            continue;
        };
        cases.push(MapEntry {
            code,
            region: t.region.clone(),
            value: t.cases,
        });
        deaths.push(MapEntry {
            code,
            region: t.region.clone(),
            value: t.deaths,
        });
    }
    (cases, deaths, unmapped)
}
