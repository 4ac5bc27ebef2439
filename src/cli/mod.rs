//! Command-line parsing for the outbreak dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_DATA_PATH, DEFAULT_DATA_URL, DEFAULT_REGIONS, DashConfig, DataSources, TopN};

/// Environment overrides for the data sources (a `.env` file is honored).
pub const ENV_DATA_PATH: &str = "OUTBREAK_DATA_PATH";
pub const ENV_DATA_URL: &str = "OUTBREAK_DATA_URL";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "odash", version, about = "Regional outbreak statistics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print metrics, region tables, rankings, and a time-series plot.
    Summary(DashArgs),
    /// Write the dashboard views to JSON (and optionally the region table to CSV).
    Export(ExportArgs),
    /// Launch the interactive TUI.
    Tui(DashArgs),
}

/// Common options: data sources and filters.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Local dataset path (falls back to the remote URL when unreadable).
    #[arg(short = 'f', long = "data", value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Remote dataset URL used as the fallback source.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Disable the remote fallback.
    #[arg(long)]
    pub no_remote: bool,

    /// First date to include (defaults to the dataset's first date).
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last date to include (defaults to the dataset's last date).
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Region to include (repeatable or comma-separated). Defaults to New York and California.
    #[arg(short = 'r', long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Include every region.
    #[arg(long, conflicts_with = "regions")]
    pub all_regions: bool,

    /// How many regions the ranked views show.
    #[arg(short = 'n', long, default_value_t = TopN::DEFAULT as u8,
          value_parser = clap::value_parser!(u8).range(TopN::MIN as i64..=TopN::MAX as i64))]
    pub top: u8,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for `export`.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// JSON file receiving every view.
    #[arg(long, value_name = "JSON")]
    pub json: PathBuf,

    /// CSV file receiving the per-region table.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::io::ingest::parse_date(s.trim())
}

/// Resolve CLI flags, environment, and defaults into a run configuration.
pub fn config_from_args(args: &DashArgs) -> DashConfig {
    dotenvy::dotenv().ok();
    config_from_args_with_env(args, |key| std::env::var(key).ok())
}

/// `config_from_args` with an injectable environment lookup.
pub fn config_from_args_with_env<F>(args: &DashArgs, env: F) -> DashConfig
where
    F: Fn(&str) -> Option<String>,
{
    let local = args
        .data
        .clone()
        .or_else(|| env(ENV_DATA_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let remote = if args.no_remote {
        None
    } else {
        Some(
            args.url
                .clone()
                .or_else(|| env(ENV_DATA_URL))
                .unwrap_or_else(|| DEFAULT_DATA_URL.to_string()),
        )
    };

    let regions = if args.all_regions {
        Vec::new()
    } else if args.regions.is_empty() {
        DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect()
    } else {
        args.regions.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    };

    DashConfig {
        sources: DataSources { local, remote },
        date_from: args.from,
        date_to: args.to,
        regions,
        top_n: TopN::new(args.top as usize),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_json: None,
        export_csv: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).unwrap()
    }

    fn dash(cli: Cli) -> DashArgs {
        match cli.command {
            Command::Summary(a) | Command::Tui(a) => a,
            Command::Export(e) => e.dash,
        }
    }

    #[test]
    fn defaults_select_default_regions_and_sources() {
        let args = dash(parse(&["odash", "summary"]));
        let cfg = config_from_args_with_env(&args, |_| None);
        assert_eq!(cfg.regions, vec!["New York".to_string(), "California".to_string()]);
        assert_eq!(cfg.sources.local, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.sources.remote.as_deref(), Some(DEFAULT_DATA_URL));
        assert_eq!(cfg.top_n.get(), 6);
    }

    #[test]
    fn flags_override_environment() {
        let args = dash(parse(&[
            "odash", "summary", "-f", "a.csv", "-r", "Ohio,Iowa", "-r", "Utah", "--from", "2020-03-01", "-n", "12",
        ]));
        let cfg = config_from_args_with_env(&args, |k| (k == ENV_DATA_PATH).then(|| "env.csv".to_string()));
        assert_eq!(cfg.sources.local, PathBuf::from("a.csv"));
        assert_eq!(cfg.regions, vec!["Ohio", "Iowa", "Utah"]);
        assert_eq!(cfg.date_from, NaiveDate::from_ymd_opt(2020, 3, 1));
        assert_eq!(cfg.top_n.get(), 12);
    }

    #[test]
    fn environment_fills_sources() {
        let args = dash(parse(&["odash", "tui", "--all-regions"]));
        let cfg = config_from_args_with_env(&args, |k| match k {
            ENV_DATA_PATH => Some("env.csv".to_string()),
            ENV_DATA_URL => Some("https://mirror.test/x.csv".to_string()),
            _ => None,
        });
        assert_eq!(cfg.sources.local, PathBuf::from("env.csv"));
        assert_eq!(cfg.sources.remote.as_deref(), Some("https://mirror.test/x.csv"));
        assert!(cfg.regions.is_empty());
    }

    #[test]
    fn top_n_outside_bounds_is_rejected() {
        assert!(Cli::try_parse_from(["odash", "summary", "-n", "1"]).is_err());
        assert!(Cli::try_parse_from(["odash", "summary", "-n", "13"]).is_err());
    }

    #[test]
    fn no_remote_disables_fallback() {
        let args = dash(parse(&["odash", "export", "--json", "out.json", "--no-remote"]));
        let cfg = config_from_args_with_env(&args, |_| None);
        assert!(cfg.sources.remote.is_none());
    }
}
