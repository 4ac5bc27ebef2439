//! Group-by reductions over enriched rows.
//!
//! Every function here is total: an empty slice yields zero sums and empty
//! collections. Counters use saturating adds so pathological inputs clamp
//! instead of overflowing.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Counters, EnrichedObservation, Metric, Ratio};

/// Region -> total, in first-appearance order.
pub type RegionSums = Vec<(String, u64)>;

/// Per-date totals across all kept regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
}

/// Both counters for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTotals {
    pub region: String,
    pub region_code: Option<&'static str>,
    pub cases: u64,
    pub deaths: u64,
}

impl RegionTotals {
    pub fn mortality(&self) -> Ratio {
        Ratio::of(self.deaths, self.cases)
    }
}

impl Counters for RegionTotals {
    fn cases(&self) -> u64 {
        self.cases
    }

    fn deaths(&self) -> u64 {
        self.deaths
    }
}

/// Running totals for one region, ascending by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSeries {
    pub region: String,
    pub points: Vec<(NaiveDate, u64)>,
}

impl RegionSeries {
    /// Running total at the last date, or 0 for an empty series.
    pub fn last_value(&self) -> u64 {
        self.points.last().map(|(_, v)| *v).unwrap_or(0)
    }
}

/// The three headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallMetrics {
    pub total_cases: u64,
    pub total_deaths: u64,
    /// `total_deaths / total_cases`, or 0 when there are no cases.
    pub overall_mortality: f64,
}

/// Sum `metric` per region.
pub fn sum_by_region(rows: &[EnrichedObservation], metric: Metric) -> RegionSums {
    region_totals(rows)
        .into_iter()
        .map(|t| {
            let v = metric.of(&t);
            (t.region, v)
        })
        .collect()
}

/// Sum both counters per region, in first-appearance order.
pub fn region_totals(rows: &[EnrichedObservation]) -> Vec<RegionTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<RegionTotals> = Vec::new();

    for r in rows {
        let idx = *index.entry(r.region.as_str()).or_insert_with(|| {
            out.push(RegionTotals {
                region: r.region.clone(),
                region_code: r.region_code,
                cases: 0,
                deaths: 0,
            });
            out.len() - 1
        });
        let entry = &mut out[idx];
        entry.cases = entry.cases.saturating_add(r.cases);
        entry.deaths = entry.deaths.saturating_add(r.deaths);
    }

    out
}

/// Sum both counters per date, ascending.
pub fn sum_by_date(rows: &[EnrichedObservation]) -> Vec<DailyTotals> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for r in rows {
        let e = by_date.entry(r.date).or_insert((0, 0));
        e.0 = e.0.saturating_add(r.cases);
        e.1 = e.1.saturating_add(r.deaths);
    }
    by_date
        .into_iter()
        .map(|(date, (cases, deaths))| DailyTotals { date, cases, deaths })
        .collect()
}

/// Per-region running sum of `metric` over ascending dates.
///
/// Rows are first grouped by `(region, date)` so duplicate rows for the same
/// day collapse into one step. Callers choose whether to pass the full or the
/// date-filtered dataset.
pub fn cumulative_by_region_over_time(rows: &[EnrichedObservation], metric: Metric) -> Vec<RegionSeries> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, BTreeMap<NaiveDate, u64>)> = Vec::new();

    for r in rows {
        let idx = *index.entry(r.region.as_str()).or_insert_with(|| {
            groups.push((r.region.clone(), BTreeMap::new()));
            groups.len() - 1
        });
        let day = groups[idx].1.entry(r.date).or_insert(0);
        *day = day.saturating_add(metric.of(r));
    }

    groups
        .into_iter()
        .map(|(region, days)| {
            let mut running = 0u64;
            let points = days
                .into_iter()
                .map(|(date, v)| {
                    running = running.saturating_add(v);
                    (date, running)
                })
                .collect();
            RegionSeries { region, points }
        })
        .collect()
}

/// Aggregate-then-divide mortality per region.
pub fn mortality_rate(rows: &[EnrichedObservation]) -> Vec<(String, Ratio)> {
    region_totals(rows)
        .into_iter()
        .map(|t| {
            let ratio = t.mortality();
            (t.region, ratio)
        })
        .collect()
}

pub fn overall_metrics(rows: &[EnrichedObservation]) -> OverallMetrics {
    let (total_cases, total_deaths) = rows.iter().fold((0u64, 0u64), |(c, d), r| {
        (c.saturating_add(r.cases), d.saturating_add(r.deaths))
    });
    OverallMetrics {
        total_cases,
        total_deaths,
        overall_mortality: Ratio::of(total_deaths, total_cases).or_zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use crate::prep::enrich;

    fn rows(input: &[(&str, u32, u64, u64)]) -> Vec<EnrichedObservation> {
        enrich(
            input
                .iter()
                .map(|(region, day, cases, deaths)| Observation {
                    region: region.to_string(),
                    date: NaiveDate::from_ymd_opt(2020, 7, *day).unwrap(),
                    cases: *cases,
                    deaths: *deaths,
                })
                .collect(),
        )
        .rows
    }

    #[test]
    fn two_region_scenario() {
        let ds = rows(&[("Ohio", 1, 100, 2), ("Iowa", 1, 50, 5)]);

        let m = overall_metrics(&ds);
        assert_eq!(m.total_cases, 150);
        assert_eq!(m.total_deaths, 7);
        assert!((m.overall_mortality - 7.0 / 150.0).abs() < 1e-12);

        let rates = mortality_rate(&ds);
        assert_eq!(rates[0], ("Ohio".to_string(), Ratio::Value(0.02)));
        assert_eq!(rates[1], ("Iowa".to_string(), Ratio::Value(0.1)));
    }

    #[test]
    fn metric_reads_rows_and_totals_alike() {
        let ds = rows(&[("Ohio", 1, 100, 2), ("Ohio", 2, 20, 1)]);
        let totals = region_totals(&ds);
        for metric in Metric::ALL {
            let by_rows: u64 = ds.iter().map(|r| metric.of(r)).sum();
            assert_eq!(metric.of(&totals[0]), by_rows);
            assert_eq!(sum_by_region(&ds, metric)[0].1, by_rows);
        }
    }

    #[test]
    fn region_sums_keep_first_appearance_order() {
        let ds = rows(&[("Utah", 1, 1, 0), ("Ohio", 1, 5, 1), ("Utah", 2, 3, 0)]);
        assert_eq!(
            sum_by_region(&ds, Metric::Cases),
            vec![("Utah".to_string(), 4), ("Ohio".to_string(), 5)]
        );
        assert_eq!(
            sum_by_region(&ds, Metric::Deaths),
            vec![("Utah".to_string(), 0), ("Ohio".to_string(), 1)]
        );
    }

    #[test]
    fn daily_totals_are_sorted() {
        let ds = rows(&[("Utah", 3, 1, 0), ("Ohio", 1, 5, 1), ("Utah", 1, 2, 1)]);
        let daily = sum_by_date(&ds);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2020-07-01");
        assert_eq!((daily[0].cases, daily[0].deaths), (7, 2));
        assert_eq!((daily[1].cases, daily[1].deaths), (1, 0));
    }

    #[test]
    fn cumulative_collapses_duplicate_days() {
        let ds = rows(&[("Ohio", 2, 0, 3), ("Ohio", 1, 0, 1), ("Ohio", 2, 0, 2), ("Iowa", 1, 0, 4)]);
        let series = cumulative_by_region_over_time(&ds, Metric::Deaths);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].region, "Ohio");
        let values: Vec<u64> = series[0].points.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 6]);
        assert_eq!(series[1].last_value(), 4);
    }

    #[test]
    fn zero_case_region_has_undefined_mortality() {
        let ds = rows(&[("Ohio", 1, 0, 0), ("Ohio", 2, 0, 0)]);
        assert_eq!(mortality_rate(&ds), vec![("Ohio".to_string(), Ratio::Undefined)]);
        assert_eq!(overall_metrics(&ds).overall_mortality, 0.0);
    }

    #[test]
    fn empty_input_is_well_defined() {
        let ds: Vec<EnrichedObservation> = Vec::new();
        assert!(sum_by_region(&ds, Metric::Cases).is_empty());
        assert!(sum_by_date(&ds).is_empty());
        assert!(cumulative_by_region_over_time(&ds, Metric::Cases).is_empty());
        let m = overall_metrics(&ds);
        assert_eq!((m.total_cases, m.total_deaths, m.overall_mortality), (0, 0, 0.0));
    }
}
