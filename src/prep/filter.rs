//! Filter stage: closed date interval plus optional region allow-list.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::EnrichedObservation;
use crate::error::PipelineError;
use crate::prep::EnrichedDataset;

/// Working subset handed to the aggregations. Rebuilt on every filter change.
pub type FilteredDataset = Vec<EnrichedObservation>;

/// Validated filter parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    date_from: NaiveDate,
    date_to: NaiveDate,
    region_allowlist: HashSet<String>,
}

impl FilterCriteria {
    /// Build criteria, rejecting `date_from > date_to`.
    ///
    /// An empty allow-list means "no region restriction".
    pub fn new<I, S>(date_from: NaiveDate, date_to: NaiveDate, regions: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if date_from > date_to {
            return Err(PipelineError::InvalidRange {
                from: date_from,
                to: date_to,
            });
        }
        Ok(Self {
            date_from,
            date_to,
            region_allowlist: regions.into_iter().map(Into::into).collect(),
        })
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    pub fn region_allowlist(&self) -> &HashSet<String> {
        &self.region_allowlist
    }

    pub fn matches(&self, row: &EnrichedObservation) -> bool {
        if row.date < self.date_from || row.date > self.date_to {
            return false;
        }
        self.region_allowlist.is_empty() || self.region_allowlist.contains(&row.region)
    }
}

/// Apply `criteria` to the dataset, returning a fresh collection.
pub fn filter(dataset: &EnrichedDataset, criteria: &FilterCriteria) -> FilteredDataset {
    dataset.rows.iter().filter(|r| criteria.matches(r)).cloned().collect()
}
