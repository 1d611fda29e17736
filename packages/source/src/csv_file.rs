//! CSV dataset reader and writer.
//!
//! Expects a header row with the columns `Date, Flight, Airline, Aircraft,
//! Incident_Type, Severity, Time_of_Day` in any order, plus an optional
//! `Risk_Score` column carrying externally supplied airline scores. Extra
//! columns are ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use airline_risk_flight_models::{Dataset, IncidentRecord, IncidentType};
use serde::Deserialize;

use crate::parsing::{parse_date, parse_optional_score};
use crate::progress::{ProgressCallback, null_progress};
use crate::{DatasetProvider, SourceError};

/// Columns every dataset file must have.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "Flight",
    "Airline",
    "Aircraft",
    "Incident_Type",
    "Severity",
    "Time_of_Day",
];

/// Optional column holding an externally supplied risk score.
pub const RISK_SCORE_COLUMN: &str = "Risk_Score";

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Flight")]
    flight: String,
    #[serde(rename = "Airline")]
    airline: String,
    #[serde(rename = "Aircraft")]
    aircraft: String,
    #[serde(rename = "Incident_Type")]
    incident_type: String,
    #[serde(rename = "Severity")]
    severity: String,
    #[serde(rename = "Time_of_Day")]
    time_of_day: String,
    #[serde(rename = "Risk_Score", default)]
    risk_score: Option<String>,
}

/// Loads a dataset from a CSV file on disk.
pub struct CsvProvider {
    path: PathBuf,
    label: String,
    progress: Arc<dyn ProgressCallback>,
}

impl CsvProvider {
    /// Creates a provider for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = format!("CSV file {}", path.display());
        Self {
            path,
            label,
            progress: null_progress(),
        }
    }

    /// Reports each parsed record to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Path of the file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetProvider for CsvProvider {
    fn name(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<Dataset, SourceError> {
        log::debug!("Reading {}", self.path.display());
        let file = File::open(&self.path)?;
        read_dataset(file, &self.progress)
    }
}

/// Parses a dataset from CSV text.
///
/// # Errors
///
/// Returns [`SourceError`] if a required column is missing, a row cannot be
/// deserialized, or a cell holds an unrecognized value.
pub fn read_dataset<R: Read>(
    reader: R,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Dataset, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(SourceError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }
    let has_risk_scores = headers.iter().any(|h| h == RISK_SCORE_COLUMN);
    if has_risk_scores {
        log::info!("{RISK_SCORE_COLUMN} column detected; supplied scores take precedence");
    }

    progress.set_message("Reading records".to_string());

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        records.push(to_record(row, idx as u64 + 1)?);
        progress.inc(1);
    }

    progress.finish(format!("Read {} records", records.len()));

    Ok(if has_risk_scores {
        Dataset::with_risk_scores(records)
    } else {
        Dataset::new(records)
    })
}

fn to_record(row: CsvRow, row_num: u64) -> Result<IncidentRecord, SourceError> {
    let invalid = |column: &str, value: &str| SourceError::InvalidValue {
        row: row_num,
        column: column.to_string(),
        value: value.to_string(),
    };

    let date = parse_date(&row.date).ok_or_else(|| invalid("Date", &row.date))?;

    // Blank incident cells mean nothing was reported.
    let incident_type = if row.incident_type.is_empty() {
        IncidentType::None
    } else {
        parse_enum(&row.incident_type).ok_or_else(|| invalid("Incident_Type", &row.incident_type))?
    };
    let severity = parse_enum(&row.severity).ok_or_else(|| invalid("Severity", &row.severity))?;
    let time_of_day =
        parse_enum(&row.time_of_day).ok_or_else(|| invalid("Time_of_Day", &row.time_of_day))?;

    let risk_score = match row.risk_score.as_deref() {
        Some(cell) => parse_optional_score(cell).map_err(|_| invalid(RISK_SCORE_COLUMN, cell))?,
        None => None,
    };

    Ok(IncidentRecord {
        date,
        flight_number: row.flight,
        airline: row.airline,
        aircraft_type: row.aircraft,
        incident_type,
        severity,
        time_of_day,
        risk_score,
    })
}

fn parse_enum<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

/// Writes `dataset` in the layout [`read_dataset`] accepts.
///
/// The `Risk_Score` column is written only if the dataset carries one.
///
/// # Errors
///
/// Returns [`SourceError`] if writing fails.
pub fn write_dataset_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), SourceError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    if dataset.has_risk_scores {
        header.push(RISK_SCORE_COLUMN);
    }
    csv.write_record(&header)?;

    for record in &dataset.records {
        let mut row = vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.flight_number.clone(),
            record.airline.clone(),
            record.aircraft_type.clone(),
            record.incident_type.to_string(),
            record.severity.to_string(),
            record.time_of_day.to_string(),
        ];
        if dataset.has_risk_scores {
            row.push(record.risk_score.map(|s| s.to_string()).unwrap_or_default());
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use airline_risk_flight_models::{Severity, TimeOfDay};

    use super::*;

    const BASIC: &str = "\
Date,Flight,Airline,Aircraft,Incident_Type,Severity,Time_of_Day
2023-04-01,6E-201,IndiGo,A320neo,None,Low,Morning
2023-04-02,SG-77,SpiceJet,B737,ATC,High,Night
2023-04-03 08:15:00,6E-202,IndiGo,A321,,Medium,Evening
";

    fn read(text: &str) -> Result<Dataset, SourceError> {
        read_dataset(text.as_bytes(), &null_progress())
    }

    #[test]
    fn reads_basic_file() {
        let ds = read(BASIC).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(!ds.has_risk_scores);

        let second = &ds.records[1];
        assert_eq!(second.airline, "SpiceJet");
        assert_eq!(second.incident_type, IncidentType::Atc);
        assert_eq!(second.severity, Severity::High);
        assert_eq!(second.time_of_day, TimeOfDay::Night);

        let third = &ds.records[2];
        assert_eq!(third.date.to_string(), "2023-04-03");
        assert_eq!(third.incident_type, IncidentType::None);
    }

    #[test]
    fn reads_risk_score_column() {
        let text = "\
Airline,Risk_Score,Date,Flight,Aircraft,Incident_Type,Severity,Time_of_Day,Notes
IndiGo,135.5,2023-04-01,6E-201,A320neo,None,Low,Morning,x
AirAsia,,2023-04-01,I5-10,A320,Weather,Low,Morning,y
";
        let ds = read(text).unwrap();
        assert!(ds.has_risk_scores);
        assert_eq!(ds.records[0].risk_score, Some(135.5));
        assert_eq!(ds.records[1].risk_score, None);
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "Date,Flight,Airline\n2023-04-01,6E-201,IndiGo\n";
        match read(text) {
            Err(SourceError::MissingColumn { column }) => assert_eq!(column, "Aircraft"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_severity_is_reported_with_row() {
        let text = "\
Date,Flight,Airline,Aircraft,Incident_Type,Severity,Time_of_Day
2023-04-01,6E-201,IndiGo,A320neo,None,Low,Morning
2023-04-01,6E-202,IndiGo,A320neo,None,Extreme,Morning
";
        match read(text) {
            Err(SourceError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Severity");
                assert_eq!(value, "Extreme");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_reported() {
        let text = "\
Date,Flight,Airline,Aircraft,Incident_Type,Severity,Time_of_Day
yesterday,6E-201,IndiGo,A320neo,None,Low,Morning
";
        assert!(matches!(
            read(text),
            Err(SourceError::InvalidValue { column, .. }) if column == "Date"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let provider = CsvProvider::new("/nonexistent/airline_risk/data.csv");
        assert!(matches!(provider.load(), Err(SourceError::Io(_))));
    }

    #[test]
    fn written_dataset_reads_back() {
        let ds = read(BASIC).unwrap();
        let mut buf = Vec::new();
        write_dataset_csv(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            "Date,Flight,Airline,Aircraft,Incident_Type,Severity,Time_of_Day\n"
        ));
        assert_eq!(read(&text).unwrap(), ds);
    }
}
