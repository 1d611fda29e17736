//! Plain-text rendering of engine results.

use std::fmt::Write as _;

use airline_risk::analysis::AnalysisResult;
use airline_risk_models::{
    CategoryCount, GroupRisk, RiskAssessment, SafetySummary, SeverityBreakdown, TrendPoint,
};

/// Renders assessments as a table with one-decimal scores.
#[must_use]
pub fn risk_table(assessments: &[RiskAssessment]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>10}  CATEGORY", "AIRLINE", "RISK SCORE");
    let _ = writeln!(out, "{}", "-".repeat(42));
    for a in assessments {
        let _ = writeln!(
            out,
            "{:<20} {:>10.1}  {} Risk",
            a.airline, a.risk_score, a.category
        );
    }
    out
}

/// Renders the safety summary and incident distribution.
#[must_use]
pub fn metrics(summary: &SafetySummary, distribution: &[CategoryCount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Records analyzed:         {}", summary.total_records);
    let _ = writeln!(out, "Incidents reported:       {}", summary.incidents_reported);
    let _ = writeln!(out, "High severity records:    {}", summary.high_severity);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {:>8}", "INCIDENT TYPE", "COUNT");
    let _ = writeln!(out, "{}", "-".repeat(29));
    if distribution.is_empty() {
        let _ = writeln!(out, "(no incidents)");
    }
    for c in distribution {
        let _ = writeln!(out, "{:<20} {:>8}", c.category, c.count);
    }
    out
}

/// Renders the result of a detailed analysis.
#[must_use]
pub fn analysis(result: &AnalysisResult) -> String {
    match result {
        AnalysisResult::RiskTrends(points) => trend(points),
        AnalysisResult::IncidentAnalysis(rows) => crosstab(rows),
        AnalysisResult::AircraftTypeRisk(groups) => group_table("AIRCRAFT", groups),
        AnalysisResult::TimeOfDayRisk(groups) => group_table("TIME OF DAY", groups),
    }
}

fn trend(points: &[TrendPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:>10} {:>10}", "MONTH", "RISK", "INCIDENTS");
    let _ = writeln!(out, "{}", "-".repeat(32));
    for p in points {
        let _ = writeln!(
            out,
            "{:<10} {:>10.1} {:>10}",
            p.period, p.risk_score, p.incident_count
        );
    }
    out
}

fn crosstab(rows: &[SeverityBreakdown]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>6} {:>6} {:>6} {:>6}",
        "AIRLINE", "LOW", "MEDIUM", "HIGH", "TOTAL"
    );
    let _ = writeln!(out, "{}", "-".repeat(48));
    for r in rows {
        let _ = writeln!(
            out,
            "{:<20} {:>6} {:>6} {:>6} {:>6}",
            r.airline,
            r.low,
            r.medium,
            r.high,
            r.total()
        );
    }
    out
}

fn group_table(label: &str, groups: &[GroupRisk]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>8} {:>10} {:>8}  CATEGORY",
        label, "RECORDS", "INCIDENTS", "RISK"
    );
    let _ = writeln!(out, "{}", "-".repeat(52));
    for g in groups {
        let _ = writeln!(
            out,
            "{:<14} {:>8} {:>10} {:>8.1}  {}",
            g.group, g.records, g.incidents, g.risk_score, g.category
        );
    }
    out
}
