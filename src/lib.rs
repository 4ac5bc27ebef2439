//! `outbreak-dash` library crate.
//!
//! The binary (`odash`) is a thin wrapper around this library so that:
//!
//! - the load/filter/aggregate pipeline is testable without spawning processes
//! - the text report, the TUI, and the exports share one set of views

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod prep;
pub mod report;
pub mod stats;
pub mod tui;
