#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Flight incident record types and severity definitions.
//!
//! This crate defines the canonical per-flight observation used across the
//! airline risk toolkit. Every data provider (uploaded CSV, synthetic
//! generator) produces [`IncidentRecord`]s collected into a [`Dataset`].

use std::str::FromStr;

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative severity recorded for a flight, used as a weight in scoring.
///
/// Severity is recorded for every row, including flights with no incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    /// Minor or no operational impact.
    Low,
    /// Noticeable operational impact.
    Medium,
    /// Serious safety-relevant impact.
    High,
}

impl Severity {
    /// Returns the scoring weight for this severity (Low 1, Medium 2, High 3).
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Kind of incident reported for a flight.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum IncidentType {
    /// Baseline flight, nothing reported.
    None,
    /// Mechanical or systems fault.
    Technical,
    /// Weather-related disruption.
    Weather,
    /// Air traffic control related.
    #[serde(rename = "ATC")]
    #[strum(serialize = "ATC")]
    Atc,
    /// Crew, ground handling or other operational cause.
    Operational,
}

impl IncidentType {
    /// Returns `true` for every type except [`IncidentType::None`].
    #[must_use]
    pub const fn is_incident(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Technical,
            Self::Weather,
            Self::Atc,
            Self::Operational,
        ]
    }
}

/// Part of the day a flight operated in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Morning, Self::Afternoon, Self::Evening, Self::Night]
    }
}

/// A single flight observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Date the flight operated.
    pub date: NaiveDate,
    /// Flight number (e.g., `"6E-2041"`).
    pub flight_number: String,
    /// Operating airline identifier.
    pub airline: String,
    /// Aircraft type designator (e.g., `"A320neo"`).
    pub aircraft_type: String,
    /// Reported incident type, [`IncidentType::None`] for a clean flight.
    pub incident_type: IncidentType,
    /// Recorded severity.
    pub severity: Severity,
    /// Part of the day the flight operated in.
    pub time_of_day: TimeOfDay,
    /// Externally supplied airline risk score carried on this row, if the
    /// source had a `Risk_Score` column and the cell was filled.
    pub risk_score: Option<f64>,
}

/// An ordered collection of [`IncidentRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<IncidentRecord>,
    /// Whether the source supplied a `Risk_Score` override column.
    pub has_risk_scores: bool,
}

impl Dataset {
    /// Creates a dataset without a risk score override column.
    #[must_use]
    pub const fn new(records: Vec<IncidentRecord>) -> Self {
        Self {
            records,
            has_risk_scores: false,
        }
    }

    /// Creates a dataset whose source carried a `Risk_Score` column.
    #[must_use]
    pub const fn with_risk_scores(records: Vec<IncidentRecord>) -> Self {
        Self {
            records,
            has_risk_scores: true,
        }
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records belonging to `airline`, in source order.
    pub fn records_for<'a>(&'a self, airline: &'a str) -> impl Iterator<Item = &'a IncidentRecord> {
        self.records.iter().filter(move |r| r.airline == airline)
    }

    /// Distinct airline identifiers in first-seen order.
    #[must_use]
    pub fn airlines(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.airline.as_str()) {
                seen.push(&record.airline);
            }
        }
        seen
    }

    /// Returns a new dataset holding only the records dated within `period`.
    ///
    /// The override column flag carries over unchanged.
    #[must_use]
    pub fn filter_period(&self, period: YearRange) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| period.contains(r.date))
                .cloned()
                .collect(),
            has_risk_scores: self.has_risk_scores,
        }
    }
}

/// An inclusive range of calendar years, written `"2020-2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    /// First year included.
    pub start: i32,
    /// Last year included.
    pub end: i32,
}

impl YearRange {
    /// Returns `true` if `date` falls inside the range.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date.year())
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for YearRange {
    type Err = InvalidYearRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidYearRangeError {
            value: s.to_string(),
        };
        let (start, end) = s.trim().split_once('-').ok_or_else(err)?;
        let start: i32 = start.trim().parse().map_err(|_| err())?;
        let end: i32 = end.trim().parse().map_err(|_| err())?;
        if start > end {
            return Err(err());
        }
        Ok(Self { start, end })
    }
}

/// Error returned when a string is not a valid `"YYYY-YYYY"` year range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearRangeError {
    /// The rejected input.
    pub value: String,
}

impl std::fmt::Display for InvalidYearRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year range '{}': expected START-END (e.g. 2020-2024)",
            self.value
        )
    }
}

impl std::error::Error for InvalidYearRangeError {}
