//! Input/output helpers.
//!
//! - CSV ingest + typing (`ingest`)
//! - local/remote dataset loading (`loader`)
//! - view exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;
pub mod loader;

pub use export::*;
pub use ingest::*;
pub use loader::*;
