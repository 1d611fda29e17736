//! Command implementations shared by the flag-driven CLI and the
//! interactive menu.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use airline_risk::report::{REPORT_FILE_NAME, report_csv_string};
use airline_risk::{analysis, build_export_report, build_report, metrics};
use airline_risk_models::AnalysisType;
use airline_risk_source::{DatasetProvider as _, write_dataset_csv};

use crate::config::AnalysisConfig;
use crate::render;
use crate::session::{self, Session};

/// Output layout for the `report` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Aligned table: airline, score, category.
    #[default]
    Table,
    /// Export CSV with flight and incident counts.
    Csv,
    /// Export rows as pretty-printed JSON.
    Json,
}

/// Renders the risk report for the session's airlines.
///
/// # Errors
///
/// Returns an error if CSV or JSON serialization fails.
pub fn report(
    session: &Session,
    format: ReportFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        ReportFormat::Table => render::risk_table(&build_report(&session.airlines, &session.dataset)),
        ReportFormat::Csv => {
            report_csv_string(&build_export_report(&session.airlines, &session.dataset))?
        }
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&build_export_report(
                &session.airlines,
                &session.dataset,
            ))?;
            json.push('\n');
            json
        }
    })
}

/// Renders the safety summary and incident distribution.
#[must_use]
pub fn safety_metrics(session: &Session) -> String {
    render::metrics(
        &metrics::safety_summary(&session.dataset),
        &metrics::incident_distribution(&session.dataset),
    )
}

/// Runs and renders a detailed analysis.
#[must_use]
pub fn analyze(session: &Session, analysis_type: AnalysisType) -> String {
    format!(
        "{}\n\n{}",
        analysis_type.label(),
        render::analysis(&analysis::run(analysis_type, &session.dataset))
    )
}

/// Generates sample data per `config` and writes it as CSV to `output`.
///
/// Dates fall inside the configured period when one is set.
///
/// # Errors
///
/// Returns an error if the period is malformed, generation fails, or the
/// file cannot be written.
pub fn write_sample(
    config: &AnalysisConfig,
    output: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let dataset = session::sample_provider(config)?.load()?;
    write_dataset_csv(&dataset, BufWriter::new(File::create(output)?))?;
    log::info!("Wrote {} sample records to {}", dataset.len(), output.display());
    Ok(dataset.len())
}

/// Prints `text` to stdout, or writes it to `output` when given.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn emit(text: &str, output: Option<&Path>) -> Result<(), std::io::Error> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Default file name for an exported report in `format`.
#[must_use]
pub const fn default_report_file(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Table => "airline_risk_analysis_report.txt",
        ReportFormat::Csv => REPORT_FILE_NAME,
        ReportFormat::Json => "airline_risk_analysis_report.json",
    }
}

#[cfg(test)]
mod tests {
    use airline_risk_source::csv_file::read_dataset;
    use airline_risk_source::progress::null_progress;
    use airline_risk_source::{DataOrigin, DatasetProvider as _, LoadedDataset, SampleProvider};

    use super::*;

    fn session(airlines: &[&str]) -> Session {
        let mut config = AnalysisConfig::default();
        config.airlines = airlines.iter().map(ToString::to_string).collect();
        config.data.seed = Some(21);
        config.data.sample_records = 300;
        let provider = SampleProvider::new(300)
            .with_seed(21)
            .with_airlines(config.airlines.clone());
        let loaded = LoadedDataset {
            dataset: provider.load().unwrap(),
            origin: DataOrigin::Primary,
            provider: provider.name().to_string(),
            primary_error: None,
        };
        Session::from_loaded(loaded, &config).unwrap()
    }

    #[test]
    fn csv_report_has_one_row_per_airline() {
        let s = session(&["Vistara", "IndiGo"]);
        let csv = report(&s, ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Vistara,"));
        assert!(lines[2].starts_with("IndiGo,"));
    }

    #[test]
    fn json_report_is_an_array() {
        let s = session(&["SpiceJet"]);
        let json = report(&s, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["airline"], "SpiceJet");
    }

    #[test]
    fn analysis_output_is_titled() {
        let s = session(&["AirAsia"]);
        let text = analyze(&s, AnalysisType::TimeOfDayRisk);
        assert!(text.starts_with("Time of Day Risk Analysis"));
    }

    #[test]
    fn csv_default_file_name() {
        assert_eq!(
            default_report_file(ReportFormat::Csv),
            "airline_risk_analysis_report.csv"
        );
    }

    #[test]
    fn written_sample_respects_period() {
        let mut config = AnalysisConfig::default();
        config.data.seed = Some(8);
        config.data.sample_records = 40;
        config.period = Some("2026-2026".to_string());
        let path = std::env::temp_dir().join(format!(
            "airline_risk_sample_{}.csv",
            std::process::id()
        ));

        let written = write_sample(&config, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let dataset = read_dataset(text.as_bytes(), &null_progress()).unwrap();
        assert_eq!(written, 40);
        assert_eq!(dataset.len(), 40);
        assert!(
            dataset
                .records
                .iter()
                .all(|r| r.date.format("%Y").to_string() == "2026")
        );
    }
}
