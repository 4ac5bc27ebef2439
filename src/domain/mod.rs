//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and enriched observations (`Observation`, `EnrichedObservation`)
//! - the undefined-safe ratio type (`Ratio`)
//! - run configuration (`DashConfig`, `DataSources`, `TopN`)
//! - the static region directory (`regions`)

pub mod regions;
pub mod types;

pub use regions::*;
pub use types::*;
