#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk assessment and analysis result types.
//!
//! Defines the outputs of the risk engine: per-airline assessments, the
//! exportable report row, safety metrics and the grouped breakdowns behind
//! each detailed analysis. These are plain values handed to whichever
//! presentation layer renders them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Coarse risk bucket derived from a numeric risk score.
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
pub enum RiskCategory {
    /// Score below 20.
    Low,
    /// Score from 20 up to (not including) 50.
    Medium,
    /// Score of 50 and above.
    High,
}

impl RiskCategory {
    /// Returns the indicator class name a styled frontend uses for this
    /// bucket.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "risk-low",
            Self::Medium => "risk-medium",
            Self::High => "risk-high",
        }
    }
}

/// Risk score and category for one airline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Airline identifier.
    pub airline: String,
    /// Risk score, 0-100 when computed; overrides pass through as given.
    pub risk_score: f64,
    /// Bucket derived from `risk_score`.
    pub category: RiskCategory,
}

/// One row of the downloadable risk report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Airline identifier.
    pub airline: String,
    /// Risk score.
    pub risk_score: f64,
    /// Bucket derived from `risk_score`.
    pub category: RiskCategory,
    /// Number of records for this airline.
    pub flights_analyzed: u64,
    /// Number of records with an actual incident.
    pub incidents: u64,
}

/// Dataset-wide safety figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySummary {
    /// Total records considered.
    pub total_records: u64,
    /// Records whose incident type is not `None`.
    pub incidents_reported: u64,
    /// Records with `High` severity, incident or not.
    pub high_severity: u64,
}

/// Count of records in a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category name.
    pub category: String,
    /// Number of records.
    pub count: u64,
}

/// Incident counts for one airline split by severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBreakdown {
    /// Airline identifier.
    pub airline: String,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl SeverityBreakdown {
    /// Sum over all severities.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// Weighted risk for a group of records (aircraft type, time of day, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRisk {
    /// Group label.
    pub group: String,
    /// Weighted risk score for the group, clamped to 100.
    pub risk_score: f64,
    /// Bucket derived from `risk_score`.
    pub category: RiskCategory,
    /// Records in the group.
    pub records: u64,
    /// Records in the group with an actual incident.
    pub incidents: u64,
}

/// A monthly data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Period label (e.g. `"2024-03"`).
    pub period: String,
    /// Weighted risk score over the month's records.
    pub risk_score: f64,
    /// Records with an actual incident in the month.
    pub incident_count: u64,
}

/// The detailed analyses offered alongside the main report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AnalysisType {
    /// Monthly weighted score and incident counts.
    RiskTrends,
    /// Incident counts per airline and severity.
    IncidentAnalysis,
    /// Weighted score per aircraft type.
    AircraftTypeRisk,
    /// Weighted score per time of day.
    TimeOfDayRisk,
}

impl AnalysisType {
    pub const ALL: &[Self] = &[
        Self::RiskTrends,
        Self::IncidentAnalysis,
        Self::AircraftTypeRisk,
        Self::TimeOfDayRisk,
    ];

    /// Human-readable title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RiskTrends => "Risk Trends Over Time",
            Self::IncidentAnalysis => "Incident Analysis",
            Self::AircraftTypeRisk => "Aircraft Type Risk",
            Self::TimeOfDayRisk => "Time of Day Risk Analysis",
        }
    }
}
