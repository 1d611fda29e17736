//! Dataset loading for a configured run.

use airline_risk_cli_utils::{IndicatifProgress, MultiProgress};
use airline_risk_flight_models::Dataset;
use chrono::NaiveDate;
use airline_risk_source::{
    CsvProvider, DataOrigin, LoadedDataset, SampleProvider, load, load_with_fallback,
};

use crate::config::{AnalysisConfig, ConfigError};

/// A loaded, period-filtered dataset and the airlines to report on.
pub struct Session {
    pub dataset: Dataset,
    pub airlines: Vec<String>,
    pub origin: DataOrigin,
    pub provider: String,
    pub primary_error: Option<String>,
}

impl Session {
    /// Loads the dataset described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured period is malformed or no
    /// provider could produce a dataset.
    pub fn open(
        config: &AnalysisConfig,
        multi: &MultiProgress,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let sample = sample_provider(config)?;

        let loaded: LoadedDataset = match &config.data.csv {
            Some(path) => {
                let csv = CsvProvider::new(path)
                    .with_progress(IndicatifProgress::records_spinner(multi, "Loading CSV"));
                if config.data.fallback_to_sample {
                    load_with_fallback(&csv, &sample)?
                } else {
                    load(&csv)?
                }
            }
            None => load(&sample)?,
        };

        Ok(Self::from_loaded(loaded, config)?)
    }

    /// Applies the configured period and airline selection to `loaded`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPeriod`] if the period is malformed.
    pub fn from_loaded(loaded: LoadedDataset, config: &AnalysisConfig) -> Result<Self, ConfigError> {
        let dataset = match config.period_range()? {
            Some(period) => {
                let filtered = loaded.dataset.filter_period(period);
                log::info!(
                    "Restricted to {period}: {} of {} records",
                    filtered.len(),
                    loaded.dataset.len()
                );
                filtered
            }
            None => loaded.dataset,
        };

        let airlines = if config.airlines.is_empty() {
            dataset.airlines().into_iter().map(ToString::to_string).collect()
        } else {
            config.airlines.clone()
        };

        Ok(Self {
            dataset,
            airlines,
            origin: loaded.origin,
            provider: loaded.provider,
            primary_error: loaded.primary_error,
        })
    }

    /// One-line description of where the data came from.
    #[must_use]
    pub fn describe_source(&self) -> String {
        match (&self.origin, &self.primary_error) {
            (DataOrigin::Fallback, Some(e)) => format!(
                "Using {} ({} records) because the CSV could not be read: {e}",
                self.provider,
                self.dataset.len()
            ),
            _ => format!("Using {} ({} records)", self.provider, self.dataset.len()),
        }
    }
}

/// Sample generator for `config`: its seed, airlines and period.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPeriod`] if the period is malformed.
pub fn sample_provider(config: &AnalysisConfig) -> Result<SampleProvider, ConfigError> {
    let mut sample = SampleProvider::new(config.data.sample_records);
    if let Some(seed) = config.data.seed {
        sample = sample.with_seed(seed);
    }
    if !config.airlines.is_empty() {
        sample = sample.with_airlines(config.airlines.clone());
    }
    if let Some(period) = config.period_range()?
        && let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(period.start, 1, 1),
            NaiveDate::from_ymd_opt(period.end, 12, 31),
        )
    {
        sample = sample.with_date_range(start, end);
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use airline_risk::build_report;
    use airline_risk_models::RiskCategory;
    use airline_risk_source::DatasetProvider as _;
    use airline_risk_source::csv_file::read_dataset;
    use airline_risk_source::progress::null_progress;

    use super::*;

    fn loaded(config: &AnalysisConfig) -> LoadedDataset {
        LoadedDataset {
            dataset: sample_provider(config).unwrap().load().unwrap(),
            origin: DataOrigin::Primary,
            provider: "sample data".to_string(),
            primary_error: None,
        }
    }

    #[test]
    fn empty_airline_selection_uses_dataset_airlines() {
        let mut config = AnalysisConfig::default();
        config.data.seed = Some(1);
        config.data.sample_records = 200;
        let session = Session::from_loaded(loaded(&config), &config).unwrap();
        assert!(!session.airlines.is_empty());
        assert_eq!(session.airlines.len(), session.dataset.airlines().len());
    }

    #[test]
    fn period_filter_applies() {
        let mut config = AnalysisConfig::load(None).unwrap();
        config.data.seed = Some(2);
        let all_years = loaded(&config);
        config.period = Some("2021-2021".to_string());
        let session = Session::from_loaded(all_years, &config).unwrap();
        assert!(session.dataset.len() < config.data.sample_records);
        assert!(session
            .dataset
            .records
            .iter()
            .all(|r| r.date.format("%Y").to_string() == "2021"));
    }

    #[test]
    fn describes_fallback() {
        let config = AnalysisConfig::default();
        let mut l = loaded(&config);
        l.origin = DataOrigin::Fallback;
        l.primary_error = Some("Missing required column 'Severity'".to_string());
        let session = Session::from_loaded(l, &config).unwrap();
        assert!(session.describe_source().contains("could not be read"));
    }

    #[test]
    fn default_config_keeps_records_outside_any_period() {
        let csv = "\
Date,Flight,Airline,Aircraft,Incident_Type,Severity,Time_of_Day,Risk_Score
2025-03-04,6E-201,IndiGo,A320neo,None,Low,Morning,12.5
2025-03-09,6E-202,IndiGo,A320neo,Weather,High,Night,12.5
";
        let loaded = LoadedDataset {
            dataset: read_dataset(csv.as_bytes(), &null_progress()).unwrap(),
            origin: DataOrigin::Primary,
            provider: "flights.csv".to_string(),
            primary_error: None,
        };
        let config = AnalysisConfig::load(None).unwrap();

        let session = Session::from_loaded(loaded, &config).unwrap();
        assert_eq!(session.dataset.len(), 2);

        let report = build_report(&["IndiGo"], &session.dataset);
        assert!((report[0].risk_score - 12.5).abs() < f64::EPSILON);
        assert_eq!(report[0].category, RiskCategory::Low);
    }

    #[test]
    fn sample_provider_follows_period() {
        let mut config = AnalysisConfig::default();
        config.data.seed = Some(3);
        config.data.sample_records = 120;
        config.period = Some("2018-2019".to_string());
        let dataset = sample_provider(&config).unwrap().load().unwrap();
        assert_eq!(dataset.len(), 120);
        assert!(dataset.records.iter().all(|r| {
            let year = r.date.format("%Y").to_string();
            year == "2018" || year == "2019"
        }));
    }

    #[test]
    fn sample_provider_rejects_bad_period() {
        let mut config = AnalysisConfig::default();
        config.period = Some("soon".to_string());
        assert!(matches!(
            sample_provider(&config),
            Err(ConfigError::InvalidPeriod(_))
        ));
    }
}
