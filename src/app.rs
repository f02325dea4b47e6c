//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches performance records
//! - shapes them into summaries/charts/tables
//! - prints reports or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DistrictArgs, RatesArgs, SummaryArgs};
use crate::data::api::PerfClient;
use crate::domain::DashConfig;
use crate::error::AppError;
use crate::{engine, plot, report, speech};

pub mod pipeline;

/// Entry point for the `nrega` binary.
pub fn run() -> Result<(), AppError> {
    // We want `nrega` and `nrega -s Bihar` to behave like `nrega tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => handle_summary(dash_config_from_args(&args)),
        Command::Rates(args) => handle_rates(args),
        Command::District(args) => handle_district(args),
        Command::States => handle_states(),
        Command::Districts => handle_districts(),
        Command::Tui(args) => crate::tui::run(args),
    }
}

pub fn dash_config_from_args(args: &SummaryArgs) -> DashConfig {
    DashConfig {
        state: args.state.clone(),
        top_n: args.top,
        chart_width: args.width,
        show_chart: !args.no_chart,
        speak: args.speak,
        export_csv: args.export.clone(),
        export_summary: args.export_summary.clone(),
    }
}

fn handle_summary(config: DashConfig) -> Result<(), AppError> {
    let client = PerfClient::from_env()?;
    let out = pipeline::run_dashboard(&client, &config.state, config.top_n);

    println!(
        "{}",
        report::format_summary(
            &config.state,
            &out.source,
            out.rows.len(),
            &out.summary,
            out.fetch_error.as_deref(),
        )
    );

    if config.show_chart && !out.chart.is_empty() {
        println!("Top districts by wage:");
        println!("{}", plot::render_bar_chart(&out.chart, config.chart_width));
    }

    println!("{}", report::format_district_table(&out.rows));

    if let Some(path) = &config.export_csv {
        crate::io::write_districts_csv(path, &out.rows)?;
        println!("Wrote district CSV: {}", path.display());
    }
    if let Some(path) = &config.export_summary {
        crate::io::write_summary_json(
            path,
            &config.state,
            &out.source,
            out.rows.len(),
            &out.summary,
            &out.chart,
        )?;
        println!("Wrote summary JSON: {}", path.display());
    }

    if config.speak {
        match out.chart.first() {
            Some(top) => {
                let text = speech::wage_announcement(&top.label, top.value);
                println!("Speaking: {text}");
                if let Err(err) = speech::speak(&text, speech::SPEECH_LANG) {
                    eprintln!("{err}");
                }
            }
            None => println!("Speaking: No data available"),
        }
    }

    Ok(())
}

fn handle_rates(args: RatesArgs) -> Result<(), AppError> {
    let client = PerfClient::from_env()?;
    // Rates cover the full dataset; the view has its own district selection.
    let out = pipeline::run_dashboard(&client, crate::domain::ALL_STATES, crate::domain::CHART_TOP_N);
    if let Some(note) = &out.fetch_error {
        println!("Data source: {} (fetch failed: {note})\n", out.source);
    }

    let mut normalized = engine::normalize_all(&out.records);

    if let Some(wanted) = &args.district {
        let known: Vec<String> = normalized
            .iter()
            .map(|n| n.metrics.district_name.clone())
            .collect();
        match engine::match_district(wanted, &known) {
            Some(matched) => {
                let matched = matched.to_string();
                println!("District: {matched}\n");
                normalized.retain(|n| n.metrics.district_name == matched);
            }
            None => {
                return Err(AppError::data(format!(
                    "District \"{wanted}\" not found in data."
                )));
            }
        }
    }

    println!("{}", report::format_rates_table(&normalized));
    Ok(())
}

fn handle_district(args: DistrictArgs) -> Result<(), AppError> {
    let client = PerfClient::from_env()?;
    let records = client.fetch_district(&args.name)?;
    if records.is_empty() {
        println!("No records for district \"{}\".", args.name);
        return Ok(());
    }

    let rows: Vec<_> = records.iter().map(engine::canonicalize).collect();
    println!("{}", report::format_district_table(&rows));
    println!("{}", report::format_rates_table(&engine::normalize_all(&records)));
    Ok(())
}

fn handle_states() -> Result<(), AppError> {
    let client = PerfClient::from_env()?;
    let payload = client.fetch_performance(None)?;
    let states = engine::list_states(&payload.records);
    println!("{}", report::format_states(&states));
    Ok(())
}

fn handle_districts() -> Result<(), AppError> {
    let client = PerfClient::from_env()?;
    let districts = client.fetch_districts()?;
    if districts.is_empty() {
        println!("(no districts)");
        return Ok(());
    }
    for district in districts {
        println!("{district}");
    }
    Ok(())
}

/// Rewrite argv so `nrega` defaults to `nrega tui`.
///
/// Rules:
/// - `nrega`                      -> `nrega tui`
/// - `nrega -s Bihar ...`         -> `nrega tui -s Bihar ...`
/// - `nrega --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "summary" | "rates" | "district" | "states" | "districts" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["nrega"])), args(&["nrega", "tui"]));
    }

    #[test]
    fn leading_flag_routes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["nrega", "-s", "Bihar"])),
            args(&["nrega", "tui", "-s", "Bihar"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["nrega", "summary"])),
            args(&["nrega", "summary"])
        );
        assert_eq!(
            rewrite_args(args(&["nrega", "--help"])),
            args(&["nrega", "--help"])
        );
    }
}
