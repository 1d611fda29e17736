#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the airline risk toolkit.
//!
//! Loads a dataset (CSV file or generated sample), scores the configured
//! airlines and prints reports, safety metrics and detailed analyses.
//! Running without a subcommand opens an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`airline_risk_cli_utils::init_logger`])
//! so that log lines and the CSV loading spinner never fight for the
//! terminal.

mod commands;
mod config;
mod interactive;
mod render;
mod session;

use std::path::PathBuf;

use airline_risk_models::AnalysisType;
use clap::{Args, Parser, Subcommand};

use crate::commands::ReportFormat;
use crate::config::{AnalysisConfig, Overrides};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "airline_risk", about = "Airline risk factor analysis")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// TOML config file (defaults to the built-in configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// CSV dataset to analyze instead of generated sample data
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// Comma-separated airlines to report on, in display order
    #[arg(long, global = true, value_delimiter = ',')]
    airlines: Option<Vec<String>>,
    /// Year range to analyze (e.g., "2020-2024")
    #[arg(long, global = true)]
    period: Option<String>,
    /// Seed for reproducible sample data
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Number of sample records to generate
    #[arg(long, global = true)]
    records: Option<usize>,
}

impl From<GlobalArgs> for Overrides {
    fn from(args: GlobalArgs) -> Self {
        Self {
            csv: args.csv,
            airlines: args.airlines,
            period: args.period,
            seed: args.seed,
            records: args.records,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the risk score and category per airline
    Report {
        /// Output layout
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print dataset-wide safety metrics and the incident distribution
    Metrics,
    /// Run a detailed analysis
    Analyze {
        /// One of: risk-trends, incident-analysis, aircraft-type-risk,
        /// time-of-day-risk
        analysis: AnalysisType,
    },
    /// Write a generated sample dataset as CSV
    Sample {
        /// Destination file
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = airline_risk_cli_utils::init_logger("info");
    let cli = Cli::parse();

    let config_path = cli.global.config.clone();
    let config =
        AnalysisConfig::load(config_path.as_deref())?.with_overrides(cli.global.into())?;

    let Some(command) = cli.command else {
        return interactive::run(config, &multi);
    };

    match command {
        Commands::Sample { output } => {
            commands::write_sample(&config, &output)?;
        }
        Commands::Report { format, output } => {
            let session = Session::open(&config, &multi)?;
            log::info!("{}", session.describe_source());
            commands::emit(&commands::report(&session, format)?, output.as_deref())?;
        }
        Commands::Metrics => {
            let session = Session::open(&config, &multi)?;
            log::info!("{}", session.describe_source());
            commands::emit(&commands::safety_metrics(&session), None)?;
        }
        Commands::Analyze { analysis } => {
            let session = Session::open(&config, &multi)?;
            log::info!("{}", session.describe_source());
            commands::emit(&commands::analyze(&session, analysis), None)?;
        }
    }

    Ok(())
}
