//! Data preparation: enrichment and filtering.
//!
//! Both stages produce fresh collections; neither mutates its input.

pub mod enrich;
pub mod filter;

pub use enrich::{EnrichedDataset, enrich};
pub use filter::{FilterCriteria, FilteredDataset, filter};
