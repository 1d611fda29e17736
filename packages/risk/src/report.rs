//! Per-airline report building and CSV export.

use std::io::Write;

use airline_risk_flight_models::Dataset;
use airline_risk_models::{ReportRow, RiskAssessment};

use crate::ReportError;
use crate::score::assess;

/// Default file name for the exported report.
pub const REPORT_FILE_NAME: &str = "airline_risk_analysis_report.csv";

/// Header row of the exported report.
pub const REPORT_HEADERS: [&str; 5] = [
    "Airline",
    "Risk Score",
    "Category",
    "Flights Analyzed",
    "Incidents",
];

/// Assesses each airline, preserving the order of `airlines`.
#[must_use]
pub fn build_report<S: AsRef<str>>(airlines: &[S], dataset: &Dataset) -> Vec<RiskAssessment> {
    airlines
        .iter()
        .map(|airline| assess(airline.as_ref(), dataset))
        .collect()
}

/// Like [`build_report`], with record and incident counts per airline.
#[must_use]
pub fn build_export_report<S: AsRef<str>>(airlines: &[S], dataset: &Dataset) -> Vec<ReportRow> {
    build_report(airlines, dataset)
        .into_iter()
        .map(|assessment| {
            let (flights_analyzed, incidents) = dataset.records_for(&assessment.airline).fold(
                (0_u64, 0_u64),
                |(flights, incidents), r| {
                    (flights + 1, incidents + u64::from(r.incident_type.is_incident()))
                },
            );
            ReportRow {
                airline: assessment.airline,
                risk_score: assessment.risk_score,
                category: assessment.category,
                flights_analyzed,
                incidents,
            }
        })
        .collect()
}

/// Writes `rows` as CSV with the [`REPORT_HEADERS`] header row.
///
/// # Errors
///
/// Returns [`ReportError`] if writing to `writer` fails.
pub fn write_report_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(REPORT_HEADERS)?;

    for row in rows {
        csv.write_record([
            row.airline.clone(),
            row.risk_score.to_string(),
            row.category.to_string(),
            row.flights_analyzed.to_string(),
            row.incidents.to_string(),
        ])?;
    }

    csv.flush()?;
    log::debug!("Wrote {} report rows", rows.len());
    Ok(())
}

/// Renders `rows` to an in-memory CSV string.
///
/// # Errors
///
/// Returns [`ReportError`] if serialization fails.
pub fn report_csv_string(rows: &[ReportRow]) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_report_csv(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
