//! Synthetic sample dataset generator.
//!
//! Produces plausible domestic-flight records for demos and as the fallback
//! when an uploaded file cannot be read. Incident and severity frequencies
//! are weighted so most flights are uneventful.

use airline_risk_flight_models::{Dataset, IncidentRecord, IncidentType, Severity, TimeOfDay};
use chrono::{Days, NaiveDate};
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng as _, SeedableRng as _};

use crate::{DatasetProvider, SourceError};

/// Default number of generated records.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Airlines covered by the sample generator when none are configured.
pub const DEFAULT_AIRLINES: &[&str] = &["IndiGo", "Air India", "SpiceJet", "Vistara", "AirAsia"];

const AIRCRAFT_TYPES: &[&str] = &["A320neo", "B737", "A321", "B787", "A320"];

const CARRIER_CODES: &[(&str, &str)] = &[
    ("IndiGo", "6E"),
    ("Air India", "AI"),
    ("SpiceJet", "SG"),
    ("Vistara", "UK"),
    ("AirAsia", "I5"),
];

const INCIDENT_WEIGHTS: &[(IncidentType, f64)] = &[
    (IncidentType::None, 0.85),
    (IncidentType::Technical, 0.05),
    (IncidentType::Weather, 0.04),
    (IncidentType::Atc, 0.03),
    (IncidentType::Operational, 0.03),
];

const SEVERITY_WEIGHTS: &[(Severity, f64)] = &[
    (Severity::Low, 0.7),
    (Severity::Medium, 0.2),
    (Severity::High, 0.1),
];

/// Generates a random [`Dataset`].
#[derive(Debug, Clone)]
pub struct SampleProvider {
    records: usize,
    seed: Option<u64>,
    airlines: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl Default for SampleProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl SampleProvider {
    /// Creates a generator for `records` records over 2020-2024 and the
    /// [`DEFAULT_AIRLINES`].
    #[must_use]
    pub fn new(records: usize) -> Self {
        Self {
            records,
            seed: None,
            airlines: DEFAULT_AIRLINES.iter().map(ToString::to_string).collect(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }

    /// Makes generation reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws airlines from `airlines` instead of the defaults.
    #[must_use]
    pub fn with_airlines(mut self, airlines: Vec<String>) -> Self {
        self.airlines = airlines;
        self
    }

    /// Restricts generated dates to `start..=end`.
    #[must_use]
    pub const fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    fn generate(&self, rng: &mut StdRng) -> Result<Vec<IncidentRecord>, SourceError> {
        if self.airlines.is_empty() {
            return Err(SourceError::Sample {
                message: "no airlines configured".to_string(),
            });
        }
        let span = u64::try_from((self.end - self.start).num_days()).map_err(|_| {
            SourceError::Sample {
                message: format!("date range {} to {} is reversed", self.start, self.end),
            }
        })?;

        let incidents = weighted(INCIDENT_WEIGHTS)?;
        let severities = weighted(SEVERITY_WEIGHTS)?;

        let mut records = Vec::with_capacity(self.records);
        for _ in 0..self.records {
            let date = self
                .start
                .checked_add_days(Days::new(rng.gen_range(0..=span)))
                .unwrap_or(self.start);
            let airline = self
                .airlines
                .choose(rng)
                .cloned()
                .unwrap_or_default();
            let flight_number = format!("{}-{}", carrier_code(&airline, rng), rng.gen_range(100..10_000));
            let aircraft_type = AIRCRAFT_TYPES.choose(rng).copied().unwrap_or("A320");
            let time_of_day = TimeOfDay::all()
                .choose(rng)
                .copied()
                .unwrap_or(TimeOfDay::Morning);

            records.push(IncidentRecord {
                date,
                flight_number,
                airline,
                aircraft_type: aircraft_type.to_string(),
                incident_type: INCIDENT_WEIGHTS[incidents.sample(rng)].0,
                severity: SEVERITY_WEIGHTS[severities.sample(rng)].0,
                time_of_day,
                risk_score: None,
            });
        }

        Ok(records)
    }
}

impl DatasetProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample data"
    }

    fn load(&self) -> Result<Dataset, SourceError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::debug!(
            "Generating {} sample records (seed: {:?})",
            self.records,
            self.seed
        );
        Ok(Dataset::new(self.generate(&mut rng)?))
    }
}

fn weighted<T>(choices: &[(T, f64)]) -> Result<WeightedIndex<f64>, SourceError> {
    WeightedIndex::new(choices.iter().map(|(_, w)| *w)).map_err(|e| SourceError::Sample {
        message: e.to_string(),
    })
}

/// Known airlines get their IATA code; anything else gets a random one.
fn carrier_code(airline: &str, rng: &mut StdRng) -> &'static str {
    CARRIER_CODES
        .iter()
        .find(|(name, _)| *name == airline)
        .or_else(|| CARRIER_CODES.choose(rng))
        .map_or("XX", |(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count() {
        let ds = SampleProvider::new(250).with_seed(42).load().unwrap();
        assert_eq!(ds.len(), 250);
        assert!(!ds.has_risk_scores);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = SampleProvider::new(100).with_seed(9).load().unwrap();
        let b = SampleProvider::new(100).with_seed(9).load().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn values_stay_within_configuration() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap();
        let ds = SampleProvider::new(500)
            .with_seed(3)
            .with_airlines(vec!["IndiGo".to_string(), "Akasa".to_string()])
            .with_date_range(start, end)
            .load()
            .unwrap();

        for record in &ds.records {
            assert!(record.date >= start && record.date <= end, "{}", record.date);
            assert!(["IndiGo", "Akasa"].contains(&record.airline.as_str()));
            assert!(AIRCRAFT_TYPES.contains(&record.aircraft_type.as_str()));
            if record.airline == "IndiGo" {
                assert!(record.flight_number.starts_with("6E-"));
            }
        }
    }

    #[test]
    fn most_flights_are_uneventful() {
        let ds = SampleProvider::new(2000).with_seed(11).load().unwrap();
        let incidents = ds
            .records
            .iter()
            .filter(|r| r.incident_type.is_incident())
            .count();
        assert!(incidents < 600, "{incidents} incidents out of 2000");
    }

    #[test]
    fn rejects_empty_airlines() {
        let provider = SampleProvider::new(10).with_airlines(Vec::new());
        assert!(matches!(provider.load(), Err(SourceError::Sample { .. })));
    }

    #[test]
    fn rejects_reversed_range() {
        let provider = SampleProvider::new(10).with_date_range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(matches!(provider.load(), Err(SourceError::Sample { .. })));
    }
}
