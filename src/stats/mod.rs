//! Aggregation library: pure reductions over enriched rows.
//!
//! - group-by sums (`aggregate`)
//! - top-N selection and the bar race (`rank`)

pub mod aggregate;
pub mod rank;

pub use aggregate::*;
pub use rank::*;

#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{EnrichedObservation, Metric, Observation};
    use crate::prep::{FilterCriteria, enrich, filter};

    const NAMES: [&str; 6] = ["Ohio", "Iowa", "Utah", "Texas", "Guam", "Atlantis"];

    fn observations() -> impl Strategy<Value = Vec<Observation>> {
        prop::collection::vec((0..NAMES.len(), 0u32..20, 0u64..1_000_000, 0u64..50_000), 0..60).prop_map(|rows| {
            rows.into_iter()
                .map(|(name, day, cases, deaths)| Observation {
                    region: NAMES[name].to_string(),
                    date: NaiveDate::from_ymd_opt(2020, 4, 1 + day).unwrap(),
                    cases,
                    deaths,
                })
                .collect()
        })
    }

    fn rows() -> impl Strategy<Value = Vec<EnrichedObservation>> {
        observations().prop_map(|obs| enrich(obs).rows)
    }

    proptest! {
        /// Grouping never creates or loses counts.
        #[test]
        fn sums_are_conserved(rows in rows()) {
            let total: u64 = rows.iter().map(|r| r.cases).sum();
            let by_region: u64 = sum_by_region(&rows, Metric::Cases).iter().map(|(_, v)| v).sum();
            let by_date: u64 = sum_by_date(&rows).iter().map(|d| d.cases).sum();
            prop_assert_eq!(by_region, total);
            prop_assert_eq!(by_date, total);
            prop_assert_eq!(overall_metrics(&rows).total_cases, total);
        }

        /// Output is sorted descending, `min(n, len)` long, and drawn from the input.
        #[test]
        fn top_n_is_a_sorted_prefix(entries in prop::collection::vec((0u32..50, 0u64..100), 0..30), n in 0usize..40) {
            let top = top_n(&entries, n);
            prop_assert_eq!(top.len(), n.min(entries.len()));
            prop_assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
            for e in &top {
                prop_assert!(entries.contains(e));
            }
        }

        /// Running totals never decrease and end at the region's sum.
        #[test]
        fn cumulative_series_are_monotone(rows in rows()) {
            let sums = sum_by_region(&rows, Metric::Deaths);
            for series in cumulative_by_region_over_time(&rows, Metric::Deaths) {
                prop_assert!(series.points.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1));
                let expected = sums.iter().find(|(r, _)| *r == series.region).map(|(_, v)| *v);
                prop_assert_eq!(Some(series.last_value()), expected);
            }
        }

        /// Overall mortality stays within [0, 1] when deaths never exceed cases.
        #[test]
        fn overall_mortality_is_a_fraction(rows in rows()) {
            let capped: Vec<EnrichedObservation> = rows
                .into_iter()
                .map(|mut r| {
                    r.deaths = r.deaths.min(r.cases);
                    r
                })
                .collect();
            let m = overall_metrics(&capped).overall_mortality;
            prop_assert!((0.0..=1.0).contains(&m));
        }

        /// A single-day filter keeps exactly that day's allowed rows.
        #[test]
        fn filter_single_day_with_allowlist(obs in observations(), day in 0u32..20) {
            let dataset = enrich(obs);
            let date = NaiveDate::from_ymd_opt(2020, 4, 1 + day).unwrap();
            let allow = ["Ohio", "Atlantis"];
            let criteria = FilterCriteria::new(date, date, allow).unwrap();
            let filtered = filter(&dataset, &criteria);

            let allowed: HashSet<&str> = allow.into_iter().collect();
            let expected = dataset
                .rows
                .iter()
                .filter(|r| r.date == date && allowed.contains(r.region.as_str()))
                .count();
            prop_assert_eq!(filtered.len(), expected);
            prop_assert!(filtered.iter().all(|r| r.region != "Guam"));
        }

        /// Filtering over the full range with no allow-list is the identity.
        #[test]
        fn full_range_filter_is_identity(obs in observations()) {
            let dataset = enrich(obs);
            if let Some((lo, hi)) = dataset.date_bounds() {
                let criteria = FilterCriteria::new(lo, hi, Vec::<String>::new()).unwrap();
                prop_assert_eq!(filter(&dataset, &criteria), dataset.rows.clone());
            }
        }
    }
}
