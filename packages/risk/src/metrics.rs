//! Dataset-wide safety metrics.

use std::collections::BTreeMap;

use airline_risk_flight_models::{Dataset, IncidentType, Severity};
use airline_risk_models::{CategoryCount, SafetySummary};

/// Counts records, reported incidents and high-severity rows.
///
/// High severity is counted over every row, including those with no
/// incident.
#[must_use]
pub fn safety_summary(dataset: &Dataset) -> SafetySummary {
    let mut summary = SafetySummary {
        total_records: 0,
        incidents_reported: 0,
        high_severity: 0,
    };

    for record in &dataset.records {
        summary.total_records += 1;
        if record.incident_type.is_incident() {
            summary.incidents_reported += 1;
        }
        if record.severity == Severity::High {
            summary.high_severity += 1;
        }
    }

    summary
}

/// Counts incidents per type, excluding [`IncidentType::None`].
///
/// Sorted by count descending, ties broken by type name.
#[must_use]
pub fn incident_distribution(dataset: &Dataset) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<IncidentType, u64> = BTreeMap::new();
    for record in &dataset.records {
        if record.incident_type.is_incident() {
            *counts.entry(record.incident_type).or_default() += 1;
        }
    }

    let mut result: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(ty, count)| CategoryCount {
            category: ty.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn summary_counts() {
        let ds = Dataset::new(vec![
            record("IndiGo", IncidentType::None, Severity::High),
            record("IndiGo", IncidentType::Technical, Severity::Low),
            record("SpiceJet", IncidentType::Atc, Severity::High),
            record("SpiceJet", IncidentType::None, Severity::Medium),
        ]);
        let summary = safety_summary(&ds);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.incidents_reported, 2);
        assert_eq!(summary.high_severity, 2);
    }

    #[test]
    fn summary_of_empty_dataset() {
        let summary = safety_summary(&Dataset::default());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.incidents_reported, 0);
        assert_eq!(summary.high_severity, 0);
    }

    #[test]
    fn distribution_excludes_none_and_sorts() {
        let ds = Dataset::new(vec![
            record("IndiGo", IncidentType::None, Severity::Low),
            record("IndiGo", IncidentType::Weather, Severity::Low),
            record("IndiGo", IncidentType::Technical, Severity::Low),
            record("AirAsia", IncidentType::Weather, Severity::Low),
            record("AirAsia", IncidentType::Atc, Severity::Low),
        ]);
        let dist = incident_distribution(&ds);
        let labels: Vec<(&str, u64)> = dist.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(labels, vec![("Weather", 2), ("ATC", 1), ("Technical", 1)]);
    }
}
