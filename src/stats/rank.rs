//! Top-N selection and the ranked bar race.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Ratio;
use crate::stats::aggregate::RegionSeries;

/// Highest `n` entries, descending by value.
///
/// Ties keep their input order (the sort is stable), so callers that pass
/// entries in first-seen order get first-seen tie-breaking.
pub fn top_n<K, V>(entries: &[(K, V)], n: usize) -> Vec<(K, V)>
where
    K: Clone,
    V: PartialOrd + Copy,
{
    let mut ranked: Vec<&(K, V)> = entries.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(n).cloned().collect()
}

/// Top-N regions by mortality; regions with undefined mortality are left out.
pub fn top_mortality(rates: &[(String, Ratio)], n: usize) -> Vec<(String, f64)> {
    let defined: Vec<(String, f64)> = rates
        .iter()
        .filter_map(|(region, ratio)| ratio.value().map(|v| (region.clone(), v)))
        .collect();
    top_n(&defined, n)
}

/// One animation frame: every raced region's running total on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceFrame {
    pub date: NaiveDate,
    /// Same order as `BarRace::regions`.
    pub values: Vec<u64>,
}

/// Frames for an animated ranked-bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BarRace {
    /// Raced regions, ranked by their final running total.
    pub regions: Vec<String>,
    pub frames: Vec<RaceFrame>,
    /// Largest value across all frames (axis bound).
    pub max_value: u64,
}

/// Build a bar race over the `n` regions with the largest final totals.
///
/// There is one frame per distinct date across the raced regions. A region
/// with no row on a frame's date carries its previous running total forward
/// (0 before its first row).
pub fn bar_race(series: &[RegionSeries], n: usize) -> BarRace {
    let finals: Vec<(usize, u64)> = series.iter().enumerate().map(|(i, s)| (i, s.last_value())).collect();
    let leaders: Vec<&RegionSeries> = top_n(&finals, n).into_iter().map(|(i, _)| &series[i]).collect();

    let mut dates: Vec<NaiveDate> = leaders
        .iter()
        .flat_map(|s| s.points.iter().map(|(d, _)| *d))
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let mut cursors = vec![0usize; leaders.len()];
    let mut current = vec![0u64; leaders.len()];
    let mut frames = Vec::with_capacity(dates.len());
    let mut max_value = 0u64;

    for date in dates {
        for (i, s) in leaders.iter().enumerate() {
            while let Some(&(d, v)) = s.points.get(cursors[i]) {
                if d > date {
                    break;
                }
                current[i] = v;
                cursors[i] += 1;
            }
            max_value = max_value.max(current[i]);
        }
        frames.push(RaceFrame {
            date,
            values: current.clone(),
        });
    }

    BarRace {
        regions: leaders.iter().map(|s| s.region.clone()).collect(),
        frames,
        max_value,
    }
}
