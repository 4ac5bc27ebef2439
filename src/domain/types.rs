//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during filtering and aggregation
//! - exported to JSON/CSV
//! - handed to the terminal dashboard without further conversion

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

/// Anything carrying a cases and a deaths counter.
pub trait Counters {
    fn cases(&self) -> u64;
    fn deaths(&self) -> u64;
}

/// Which cumulative counter to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cases,
    Deaths,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Cases, Metric::Deaths];

    /// Read this metric off a row or a total.
    pub fn of<T: Counters + ?Sized>(self, item: &T) -> u64 {
        match self {
            Metric::Cases => item.cases(),
            Metric::Deaths => item.deaths(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }
}

/// One typed row of the source dataset.
///
/// `cases` and `deaths` are cumulative counters as reported by the source.
/// `deaths <= cases` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub region: String,
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
}

/// A quotient that is explicitly undefined when the denominator is zero.
///
/// Serialized as a number or `null`, never as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Ratio {
    Value(f64),
    Undefined,
}

impl Ratio {
    pub fn of(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Ratio::Undefined
        } else {
            Ratio::Value(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(v),
            Ratio::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Ratio::Undefined)
    }

    /// Collapse to a plain number for displays that have no "no data" slot.
    pub fn or_zero(self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl From<Ratio> for Option<f64> {
    fn from(value: Ratio) -> Self {
        value.value()
    }
}

/// An observation after enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedObservation {
    pub region: String,
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
    /// Per-row `deaths / cases`.
    pub mortality: Ratio,
    /// Short code from the region directory; `None` when the name is unknown.
    pub region_code: Option<&'static str>,
}

impl Counters for EnrichedObservation {
    fn cases(&self) -> u64 {
        self.cases
    }

    fn deaths(&self) -> u64 {
        self.deaths
    }
}

/// Bounded top-N cutoff used by the ranking views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 2;
    pub const MAX: usize = 12;
    pub const DEFAULT: usize = 6;

    /// Clamp `n` into `[MIN, MAX]`.
    pub fn new(n: usize) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn step(self, delta: i32) -> Self {
        if delta >= 0 {
            Self::new(self.0.saturating_add(delta as usize))
        } else {
            Self::new(self.0.saturating_sub(delta.unsigned_abs() as usize))
        }
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Number of regions shown in the bar race.
pub const RACE_REGIONS: usize = 10;

/// Default local dataset path.
pub const DEFAULT_DATA_PATH: &str = "us_covid_data.csv";

/// Default remote fallback (same schema as the local file).
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/IvanCruzl/Covid-19-Dashboard/main/us_covid_data.csv";

/// Regions selected when the user does not pass any.
pub const DEFAULT_REGIONS: [&str; 2] = ["New York", "California"];

/// Where the dataset may be read from, in precedence order.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub local: PathBuf,
    /// Remote fallback; `None` disables the fallback.
    pub remote: Option<String>,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            local: PathBuf::from(DEFAULT_DATA_PATH),
            remote: Some(DEFAULT_DATA_URL.to_string()),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub sources: DataSources,

    /// Inclusive lower bound; `None` means the dataset's first date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound; `None` means the dataset's last date.
    pub date_to: Option<NaiveDate>,
    /// Region allow-list; empty means every region.
    pub regions: Vec<String>,

    pub top_n: TopN,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            sources: DataSources::default(),
            date_from: None,
            date_to: None,
            regions: DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
            top_n: TopN::default(),
            plot: true,
            plot_width: 80,
            plot_height: 20,
            export_json: None,
            export_csv: None,
        }
    }
}
