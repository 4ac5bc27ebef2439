//! Presentation inputs and plain-text reports.
//!
//! - chart inputs for one filter state (`views`)
//! - terminal text rendering (`format`)

pub mod format;
pub mod views;

pub use format::*;
pub use views::*;
