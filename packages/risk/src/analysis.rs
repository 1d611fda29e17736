//! Grouped breakdowns behind each [`AnalysisType`].
//!
//! Every grouped score reuses [`weighted_score`] and [`categorize`], so a
//! group's number means the same thing as an airline's computed score.
//! Each record weighs at least 1, so any non-empty group saturates at
//! [`MAX_RISK_SCORE`](crate::score::MAX_RISK_SCORE) and lands in High. The
//! record and incident counts are what separate one group from another.

use std::collections::BTreeMap;

use airline_risk_flight_models::{Dataset, IncidentRecord, Severity, TimeOfDay};
use airline_risk_models::{AnalysisType, GroupRisk, SeverityBreakdown, TrendPoint};
use chrono::Datelike as _;

use crate::score::{categorize, weighted_score};

/// Result of running one [`AnalysisType`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    RiskTrends(Vec<TrendPoint>),
    IncidentAnalysis(Vec<SeverityBreakdown>),
    AircraftTypeRisk(Vec<GroupRisk>),
    TimeOfDayRisk(Vec<GroupRisk>),
}

/// Runs the analysis selected by `analysis`.
#[must_use]
pub fn run(analysis: AnalysisType, dataset: &Dataset) -> AnalysisResult {
    log::debug!("Running {analysis} over {} records", dataset.len());
    match analysis {
        AnalysisType::RiskTrends => AnalysisResult::RiskTrends(monthly_trend(dataset)),
        AnalysisType::IncidentAnalysis => {
            AnalysisResult::IncidentAnalysis(incident_severity_crosstab(dataset))
        }
        AnalysisType::AircraftTypeRisk => {
            AnalysisResult::AircraftTypeRisk(aircraft_type_risk(dataset))
        }
        AnalysisType::TimeOfDayRisk => AnalysisResult::TimeOfDayRisk(time_of_day_risk(dataset)),
    }
}

/// Incident counts per airline and severity.
///
/// Only rows with an actual incident are counted. Airlines appear in
/// first-seen order; airlines without incidents are omitted.
#[must_use]
pub fn incident_severity_crosstab(dataset: &Dataset) -> Vec<SeverityBreakdown> {
    let mut rows: Vec<SeverityBreakdown> = Vec::new();

    for record in dataset
        .records
        .iter()
        .filter(|r| r.incident_type.is_incident())
    {
        let idx = if let Some(idx) = rows.iter().position(|b| b.airline == record.airline) {
            idx
        } else {
            rows.push(SeverityBreakdown {
                airline: record.airline.clone(),
                low: 0,
                medium: 0,
                high: 0,
            });
            rows.len() - 1
        };

        let row = &mut rows[idx];
        match record.severity {
            Severity::Low => row.low += 1,
            Severity::Medium => row.medium += 1,
            Severity::High => row.high += 1,
        }
    }

    rows
}

/// Weighted risk per aircraft type, sorted by type name.
///
/// Every listed type scores `MAX_RISK_SCORE`.
#[must_use]
pub fn aircraft_type_risk(dataset: &Dataset) -> Vec<GroupRisk> {
    let mut groups: BTreeMap<&str, Vec<&IncidentRecord>> = BTreeMap::new();
    for record in &dataset.records {
        groups.entry(&record.aircraft_type).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(aircraft, records)| group_risk(aircraft, &records))
        .collect()
}

/// Weighted risk per time of day, in Morning → Night order.
///
/// Times of day with no records are omitted, and every listed one scores
/// `MAX_RISK_SCORE`.
#[must_use]
pub fn time_of_day_risk(dataset: &Dataset) -> Vec<GroupRisk> {
    TimeOfDay::all()
        .iter()
        .filter_map(|time| {
            let records: Vec<&IncidentRecord> = dataset
                .records
                .iter()
                .filter(|r| r.time_of_day == *time)
                .collect();
            (!records.is_empty()).then(|| group_risk(time.as_ref(), &records))
        })
        .collect()
}

/// Weighted score and incident count per calendar month, ascending.
///
/// Only months that have records are reported, so every point scores
/// `MAX_RISK_SCORE`; `incident_count` carries the trend.
#[must_use]
pub fn monthly_trend(dataset: &Dataset) -> Vec<TrendPoint> {
    let mut months: BTreeMap<(i32, u32), Vec<&IncidentRecord>> = BTreeMap::new();
    for record in &dataset.records {
        months
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record);
    }

    months
        .into_iter()
        .map(|((year, month), records)| TrendPoint {
            period: format!("{year:04}-{month:02}"),
            risk_score: weighted_score(records.iter().copied()),
            incident_count: count_incidents(&records),
        })
        .collect()
}

fn group_risk(label: &str, records: &[&IncidentRecord]) -> GroupRisk {
    let risk_score = weighted_score(records.iter().copied());
    GroupRisk {
        group: label.to_string(),
        risk_score,
        category: categorize(risk_score),
        records: records.len() as u64,
        incidents: count_incidents(records),
    }
}

fn count_incidents(records: &[&IncidentRecord]) -> u64 {
    records
        .iter()
        .filter(|r| r.incident_type.is_incident())
        .count() as u64
}

#[cfg(test)]
mod tests {
    use airline_risk_flight_models::IncidentType;
    use airline_risk_models::RiskCategory;
    use chrono::NaiveDate;

    use super::*;
    use crate::score::MAX_RISK_SCORE;
    use crate::test_support::record;

    #[test]
    fn crosstab_counts_only_incidents() {
        let ds = Dataset::new(vec![
            record("IndiGo", IncidentType::None, Severity::High),
            record("SpiceJet", IncidentType::Weather, Severity::High),
            record("IndiGo", IncidentType::Technical, Severity::Low),
            record("IndiGo", IncidentType::Atc, Severity::Low),
            record("Vistara", IncidentType::None, Severity::Medium),
        ]);
        let rows = incident_severity_crosstab(&ds);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].airline, "SpiceJet");
        assert_eq!((rows[0].low, rows[0].medium, rows[0].high), (0, 0, 1));
        assert_eq!(rows[1].airline, "IndiGo");
        assert_eq!((rows[1].low, rows[1].medium, rows[1].high), (2, 0, 0));
    }

    #[test]
    fn aircraft_groups_sorted_by_type() {
        let mut b787 = record("AirAsia", IncidentType::Technical, Severity::High);
        b787.aircraft_type = "B787".to_string();
        let ds = Dataset::new(vec![
            b787,
            record("AirAsia", IncidentType::None, Severity::Low),
        ]);
        let groups = aircraft_type_risk(&ds);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, "A320");
        assert_eq!(groups[0].records, 1);
        assert_eq!(groups[0].incidents, 0);
        assert_eq!(groups[1].group, "B787");
        assert_eq!(groups[1].incidents, 1);
        assert_eq!(groups[1].category, RiskCategory::High);
    }

    #[test]
    fn time_of_day_skips_empty_groups() {
        let mut night = record("IndiGo", IncidentType::None, Severity::Low);
        night.time_of_day = TimeOfDay::Night;
        let ds = Dataset::new(vec![
            night,
            record("IndiGo", IncidentType::None, Severity::Low),
        ]);
        let groups = time_of_day_risk(&ds);
        let labels: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(labels, vec!["Morning", "Night"]);
    }

    #[test]
    fn monthly_trend_is_chronological() {
        let mut later = record("IndiGo", IncidentType::Weather, Severity::High);
        later.date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        let mut earlier = record("IndiGo", IncidentType::None, Severity::Low);
        earlier.date = NaiveDate::from_ymd_opt(2021, 11, 30).unwrap();
        let ds = Dataset::new(vec![later, earlier]);

        let trend = monthly_trend(&ds);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].period, "2021-11");
        assert_eq!(trend[0].incident_count, 0);
        assert_eq!(trend[1].period, "2023-01");
        assert_eq!(trend[1].incident_count, 1);
    }

    #[test]
    fn run_dispatches_by_type() {
        let ds = Dataset::new(vec![record("IndiGo", IncidentType::Atc, Severity::Medium)]);
        assert!(matches!(
            run(AnalysisType::IncidentAnalysis, &ds),
            AnalysisResult::IncidentAnalysis(rows) if rows.len() == 1
        ));
        assert!(matches!(
            run(AnalysisType::RiskTrends, &Dataset::default()),
            AnalysisResult::RiskTrends(points) if points.is_empty()
        ));
    }

    #[test]
    fn non_empty_groups_saturate() {
        let mut evening = record("Vistara", IncidentType::None, Severity::Low);
        evening.time_of_day = TimeOfDay::Evening;
        evening.aircraft_type = "ATR72".to_string();
        evening.date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        let ds = Dataset::new(vec![
            evening,
            record("Vistara", IncidentType::Technical, Severity::Medium),
            record("Vistara", IncidentType::None, Severity::Low),
        ]);

        let groups = aircraft_type_risk(&ds)
            .into_iter()
            .chain(time_of_day_risk(&ds));
        for group in groups {
            assert!((group.risk_score - MAX_RISK_SCORE).abs() < f64::EPSILON);
            assert_eq!(group.category, RiskCategory::High);
        }

        let trend = monthly_trend(&ds);
        assert_eq!(trend.len(), 2);
        assert!(
            trend
                .iter()
                .all(|p| (p.risk_score - MAX_RISK_SCORE).abs() < f64::EPSILON)
        );
        assert_eq!(trend[1].incident_count, 1);
    }
}
