//! Command-line parsing for the district performance dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data-shaping code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ALL_STATES, CHART_TOP_N};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "nrega", version, about = "MGNREGA district performance dashboard (terminal)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch performance records and print the KPI summary, chart, and table.
    Summary(SummaryArgs),
    /// Print per-1000-household normalized rates.
    Rates(RatesArgs),
    /// Fetch and print one district's records from the district endpoint.
    District(DistrictArgs),
    /// List the states present in the current dataset.
    States,
    /// List district identifiers known to the upstream API.
    Districts,
    /// Launch the interactive TUI dashboard.
    ///
    /// This uses the same fetch/shape pipeline as `nrega summary`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Options for the one-shot summary view.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// State to filter on ("All" means no filtering).
    #[arg(short = 's', long, default_value = ALL_STATES)]
    pub state: String,

    /// Show the top-N districts in the wage chart.
    #[arg(long, default_value_t = CHART_TOP_N)]
    pub top: usize,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 48)]
    pub width: usize,

    /// Disable the bar chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Export the district table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the KPI summary and chart series to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,

    /// Speak the top district's wage after printing.
    #[arg(long)]
    pub speak: bool,
}

/// Options for the normalized-rates view.
#[derive(Debug, Parser, Clone)]
pub struct RatesArgs {
    /// District to focus on (fuzzy-matched against the dataset).
    #[arg(short = 'd', long)]
    pub district: Option<String>,
}

/// Options for the single-district view.
#[derive(Debug, Parser, Clone)]
pub struct DistrictArgs {
    /// District name as known to the upstream API.
    pub name: String,
}

/// Options for the interactive TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Initial state selection.
    #[arg(short = 's', long, default_value = ALL_STATES)]
    pub state: String,

    /// Show the top-N districts in the wage chart.
    #[arg(long, default_value_t = CHART_TOP_N)]
    pub top: usize,
}
