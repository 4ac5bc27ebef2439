//! Shared pipeline logic used by the CLI commands and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> enrich -> filter -> aggregate -> views
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use std::time::Instant;

use chrono::NaiveDate;

use crate::domain::{DashConfig, DataSources, TopN};
use crate::error::{AppError, PipelineError};
use crate::io::loader::{self, LoadReport, LoadedData};
use crate::prep::{self, EnrichedDataset, FilterCriteria, FilteredDataset};
use crate::report::{DashboardViews, build_views};

/// Per-session state: the enriched dataset and how it was loaded.
///
/// Owned by whoever drives the session (a CLI command or the TUI app); there
/// is no process-wide dataset.
#[derive(Debug, Clone)]
pub struct Session {
    pub load: LoadReport,
    pub dataset: EnrichedDataset,
    /// First and last date of the enriched dataset.
    pub bounds: (NaiveDate, NaiveDate),
}

impl Session {
    /// Load and enrich the dataset.
    pub fn load(sources: &DataSources) -> Result<Self, AppError> {
        let loaded = loader::load(sources)?;
        Self::from_loaded(loaded)
    }

    /// Enrich an already loaded dataset.
    ///
    /// `loader` never hands over a territory-only dataset, so an empty result
    /// here is a source failure like any other (exit code 4).
    pub fn from_loaded(loaded: LoadedData) -> Result<Self, AppError> {
        let dataset = prep::enrich(loaded.observations);
        let bounds = dataset.date_bounds().ok_or_else(|| {
            PipelineError::source_failed(loaded.report.origin.to_string(), "no rows remain after excluding territories")
        })?;
        Ok(Self {
            load: loaded.report,
            dataset,
            bounds,
        })
    }

    /// Build filter criteria, defaulting missing dates to the dataset bounds.
    pub fn criteria(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        regions: &[String],
    ) -> Result<FilterCriteria, PipelineError> {
        FilterCriteria::new(
            date_from.unwrap_or(self.bounds.0),
            date_to.unwrap_or(self.bounds.1),
            regions.iter().cloned(),
        )
    }
}

/// All computed outputs for one filter state.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub criteria: FilterCriteria,
    pub filtered: FilteredDataset,
    pub views: DashboardViews,
}

/// Filter and aggregate. Recomputes everything from the enriched dataset.
pub fn run(session: &Session, criteria: FilterCriteria, top_n: TopN) -> RunOutput {
    let started = Instant::now();
    let filtered = prep::filter(&session.dataset, &criteria);
    let views = build_views(&session.dataset, &filtered, &criteria, top_n);
    tracing::debug!(
        rows = filtered.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "recomputed views"
    );
    RunOutput {
        criteria,
        filtered,
        views,
    }
}

/// Load a session and compute the views for `config`.
pub fn run_with_config(config: &DashConfig) -> Result<(Session, RunOutput), AppError> {
    let session = Session::load(&config.sources)?;
    let criteria = session.criteria(config.date_from, config.date_to, &config.regions)?;
    let output = run(&session, criteria, config.top_n);
    Ok((session, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::loader::{DataOrigin, from_reader};

    fn session(csv: &str) -> Result<Session, AppError> {
        let loaded = from_reader(csv.as_bytes(), DataOrigin::Remote("test".to_string())).unwrap();
        Session::from_loaded(loaded)
    }

    #[test]
    fn criteria_default_to_dataset_bounds() {
        let s = session("date,state,cases,deaths\n2020-03-02,Ohio,1,0\n2020-03-09,Iowa,4,1\n").unwrap();
        let c = s.criteria(None, None, &[]).unwrap();
        assert_eq!(c.date_from().to_string(), "2020-03-02");
        assert_eq!(c.date_to().to_string(), "2020-03-09");

        let out = run(&s, c, TopN::default());
        assert_eq!(out.filtered.len(), 2);
        assert_eq!(out.views.metrics.total_cases, 5);
    }

    #[test]
    fn reversed_explicit_dates_are_rejected() {
        let s = session("date,state,cases,deaths\n2020-03-02,Ohio,1,0\n").unwrap();
        let from = NaiveDate::from_ymd_opt(2020, 4, 1);
        assert!(matches!(
            s.criteria(from, None, &[]),
            Err(PipelineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn territory_only_dataset_is_a_source_failure() {
        let loaded = LoadedData {
            observations: vec![crate::domain::Observation {
                region: "Guam".to_string(),
                date: NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
                cases: 1,
                deaths: 0,
            }],
            report: LoadReport {
                origin: DataOrigin::Remote("test".to_string()),
                rows_read: 1,
                rows_used: 1,
                row_errors: Vec::new(),
            },
        };
        let err = Session::from_loaded(loaded).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("excluding territories"));
    }
}
