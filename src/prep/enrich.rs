//! Enrichment: territory exclusion, region codes, per-row mortality.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::domain::{EnrichedObservation, Observation, Ratio, is_excluded_territory, region_code};

/// The session dataset after enrichment.
#[derive(Debug, Clone, Default)]
pub struct EnrichedDataset {
    pub rows: Vec<EnrichedObservation>,
    /// Region names with no directory entry, collected once.
    pub unrecognized_regions: BTreeSet<String>,
    /// Rows removed because their region is an excluded territory.
    pub excluded_rows: usize,
}

impl EnrichedDataset {
    /// First and last date present, if any.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.date;
        Some(self.rows.iter().fold((first, first), |(lo, hi), r| (lo.min(r.date), hi.max(r.date))))
    }

    /// Distinct region names in first-seen order.
    pub fn regions(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.region.as_str()))
            .map(|r| r.region.clone())
            .collect()
    }
}

/// Enrich raw observations.
///
/// Territories are dropped before anything else looks at the rows, so they
/// never show up as unrecognized regions either.
pub fn enrich(observations: Vec<Observation>) -> EnrichedDataset {
    let mut unrecognized_regions = BTreeSet::new();
    let mut excluded_rows = 0usize;
    let mut rows = Vec::with_capacity(observations.len());

    for obs in observations {
        if is_excluded_territory(&obs.region) {
            excluded_rows += 1;
            continue;
        }

        let code = region_code(&obs.region);
        if code.is_none() && !unrecognized_regions.contains(&obs.region) {
            unrecognized_regions.insert(obs.region.clone());
        }

        rows.push(EnrichedObservation {
            mortality: Ratio::of(obs.deaths, obs.cases),
            region_code: code,
            region: obs.region,
            date: obs.date,
            cases: obs.cases,
            deaths: obs.deaths,
        });
    }

    if !unrecognized_regions.is_empty() {
        tracing::warn!(regions = ?unrecognized_regions, "unrecognized region names");
    }

    EnrichedDataset {
        rows,
        unrecognized_regions,
        excluded_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(region: &str, day: u32, cases: u64, deaths: u64) -> Observation {
        Observation {
            region: region.to_string(),
            date: NaiveDate::from_ymd_opt(2020, 4, day).unwrap(),
            cases,
            deaths,
        }
    }

    #[test]
    fn drops_territories_and_collects_unknown_names_once() {
        let ds = enrich(vec![
            obs("Texas", 1, 10, 1),
            obs("Guam", 1, 5, 0),
            obs("Atlantis", 1, 3, 0),
            obs("Atlantis", 2, 4, 0),
            obs("District of Columbia", 2, 9, 1),
        ]);

        assert_eq!(ds.rows.len(), 3);
        assert_eq!(ds.excluded_rows, 2);
        assert_eq!(ds.unrecognized_regions.iter().collect::<Vec<_>>(), vec!["Atlantis"]);
        assert_eq!(ds.rows[0].region_code, Some("TX"));
        assert_eq!(ds.rows[1].region_code, None);
    }

    #[test]
    fn zero_cases_gives_undefined_mortality() {
        let ds = enrich(vec![obs("Ohio", 1, 0, 0), obs("Ohio", 2, 50, 5)]);
        assert!(ds.rows[0].mortality.is_undefined());
        assert_eq!(ds.rows[1].mortality, Ratio::Value(0.1));
    }

    #[test]
    fn deaths_above_cases_is_kept() {
        let ds = enrich(vec![obs("Ohio", 1, 1, 3)]);
        assert_eq!(ds.rows.len(), 1);
        assert_eq!(ds.rows[0].mortality, Ratio::Value(3.0));
    }

    #[test]
    fn bounds_and_region_order() {
        let ds = enrich(vec![obs("Utah", 3, 1, 0), obs("Iowa", 1, 1, 0), obs("Utah", 2, 1, 0)]);
        let (lo, hi) = ds.date_bounds().unwrap();
        assert_eq!(lo.to_string(), "2020-04-01");
        assert_eq!(hi.to_string(), "2020-04-03");
        assert_eq!(ds.regions(), vec!["Utah".to_string(), "Iowa".to_string()]);
        assert!(enrich(Vec::new()).date_bounds().is_none());
    }

    #[test]
    fn enrichment_is_deterministic() {
        let input = vec![obs("Utah", 3, 7, 1), obs("Nowhere", 1, 2, 0)];
        let a = enrich(input.clone());
        let b = enrich(input);
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.unrecognized_regions, b.unrecognized_regions);
    }
}
