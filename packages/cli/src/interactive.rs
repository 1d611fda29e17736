//! Interactive menu for the airline risk toolkit.
//!
//! Provides a `dialoguer` menu for choosing airlines, a data file and an
//! analysis without memorizing CLI flags. The choices are folded into the
//! [`AnalysisConfig`] before anything is loaded.

use std::path::{Path, PathBuf};

use airline_risk_cli_utils::MultiProgress;
use airline_risk_models::AnalysisType;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::commands::{self, ReportFormat};
use crate::config::AnalysisConfig;
use crate::session::Session;

/// Top-level actions available in the interactive menu.
enum Action {
    RiskReport,
    SafetyMetrics,
    DetailedAnalysis,
    ExportReport,
    GenerateSample,
}

impl Action {
    const ALL: &[Self] = &[
        Self::RiskReport,
        Self::SafetyMetrics,
        Self::DetailedAnalysis,
        Self::ExportReport,
        Self::GenerateSample,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::RiskReport => "Show risk scores",
            Self::SafetyMetrics => "Show safety metrics",
            Self::DetailedAnalysis => "Run a detailed analysis",
            Self::ExportReport => "Export risk report (CSV)",
            Self::GenerateSample => "Generate sample CSV",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if user input fails or the selected operation fails.
pub fn run(
    mut config: AnalysisConfig,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Airline Risk Factor Analysis");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;
    let action = &Action::ALL[idx];

    if let Action::GenerateSample = action {
        let output: String = Input::new()
            .with_prompt("Output file")
            .default("sample_flights.csv".to_string())
            .interact_text()?;
        let written = commands::write_sample(&config, Path::new(output.trim()))?;
        println!("Wrote {written} records to {}", output.trim());
        return Ok(());
    }

    choose_data_file(&mut config)?;
    choose_airlines(&mut config)?;

    let session = Session::open(&config, multi)?;
    println!("{}", session.describe_source());
    println!();

    match action {
        Action::RiskReport => {
            commands::emit(&commands::report(&session, ReportFormat::Table)?, None)?;
        }
        Action::SafetyMetrics => commands::emit(&commands::safety_metrics(&session), None)?,
        Action::DetailedAnalysis => {
            let labels: Vec<&str> = AnalysisType::ALL.iter().map(|a| a.label()).collect();
            let idx = Select::new()
                .with_prompt("Select analysis type")
                .items(&labels)
                .default(0)
                .interact()?;
            commands::emit(&commands::analyze(&session, AnalysisType::ALL[idx]), None)?;
        }
        Action::ExportReport => {
            let output: String = Input::new()
                .with_prompt("Output file")
                .default(commands::default_report_file(ReportFormat::Csv).to_string())
                .interact_text()?;
            let text = commands::report(&session, ReportFormat::Csv)?;
            commands::emit(&text, Some(Path::new(output.trim())))?;
            println!("Risk analysis report written to {}", output.trim());
        }
        Action::GenerateSample => {}
    }

    Ok(())
}

fn choose_data_file(config: &mut AnalysisConfig) -> Result<(), Box<dyn std::error::Error>> {
    let current = config
        .data
        .csv
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let path: String = Input::new()
        .with_prompt("CSV data file (leave empty for sample data)")
        .default(current)
        .allow_empty(true)
        .interact_text()?;

    config.data.csv = if path.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(path.trim()))
    };

    if config.data.csv.is_some() {
        config.data.fallback_to_sample = Confirm::new()
            .with_prompt("Fall back to sample data if the file cannot be read?")
            .default(config.data.fallback_to_sample)
            .interact()?;
    }

    Ok(())
}

fn choose_airlines(config: &mut AnalysisConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.airlines.is_empty() {
        return Ok(());
    }

    let defaults = vec![true; config.airlines.len()];
    let selected = MultiSelect::new()
        .with_prompt("Airlines (space to toggle)")
        .items(&config.airlines)
        .defaults(&defaults)
        .interact()?;

    config.airlines = selected
        .into_iter()
        .map(|i| config.airlines[i].clone())
        .collect();

    Ok(())
}
