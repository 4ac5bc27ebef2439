//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset (local file, then remote fallback)
//! - filters and aggregates
//! - prints reports/plots or writes exports

use clap::Parser;

use crate::cli::{Command, DashArgs, ExportArgs, config_from_args};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `odash` binary.
pub fn run() -> Result<(), AppError> {
    // `odash` and `odash -r Ohio` behave like `odash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // The TUI owns the terminal; log lines would corrupt the screen unless
    // explicitly requested via RUST_LOG.
    let default_directive = match cli.command {
        Command::Tui(_) => "off",
        _ => "info",
    };
    crate::logging::init(default_directive);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: DashArgs) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let (session, output) = pipeline::run_with_config(&config)?;

    println!(
        "{}",
        crate::report::format_summary(&output.views, &session.dataset, &session.load)
    );

    if config.plot {
        let plot = crate::plot::render_timeline_plot(&output.views.timeline, config.plot_width, config.plot_height);
        println!("{plot}");
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let mut config = config_from_args(&args.dash);
    config.export_json = Some(args.json);
    config.export_csv = args.csv;

    let (_session, output) = pipeline::run_with_config(&config)?;

    if let Some(path) = &config.export_json {
        crate::io::export::write_views_json(path, &output.views)?;
        tracing::info!(path = %path.display(), "wrote views");
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_region_csv(path, &output.views)?;
        tracing::info!(path = %path.display(), "wrote region table");
    }
    Ok(())
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let config = config_from_args(&args);
    crate::tui::run(config)
}

/// Rewrite argv so `odash` defaults to `odash tui`.
///
/// Rules:
/// - `odash`                      -> `odash tui`
/// - `odash -r Ohio ...`          -> `odash tui -r Ohio ...`
/// - `odash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
