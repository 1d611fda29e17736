#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Airline risk scoring, categorization and report engine.
//!
//! Every function here is a pure computation over an in-memory
//! [`Dataset`](airline_risk_flight_models::Dataset): no I/O, no shared
//! state. The only fallible operations are the CSV report writers.

pub mod analysis;
pub mod metrics;
pub mod report;
pub mod score;

pub use report::{build_export_report, build_report};
pub use score::{categorize, compute_risk_score};

use thiserror::Error;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while flushing the report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered report was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
pub(crate) mod test_support {
    use airline_risk_flight_models::{IncidentRecord, IncidentType, Severity, TimeOfDay};
    use chrono::NaiveDate;

    pub fn record(airline: &str, incident_type: IncidentType, severity: Severity) -> IncidentRecord {
        IncidentRecord {
            date: NaiveDate::from_ymd_opt(2022, 6, 15).unwrap(),
            flight_number: "AI-101".to_string(),
            airline: airline.to_string(),
            aircraft_type: "A320".to_string(),
            incident_type,
            severity,
            time_of_day: TimeOfDay::Morning,
            risk_score: None,
        }
    }
}
