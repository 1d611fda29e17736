//! Analysis configuration.
//!
//! Every run works from an explicit [`AnalysisConfig`]: the embedded
//! default (or a `--config` file), with command-line flags layered on top.
//! Nothing is read from ambient state once the config is built.

use std::path::{Path, PathBuf};

use airline_risk_flight_models::YearRange;
use serde::{Deserialize, Serialize};

/// Configuration embedded at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur while building the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AnalysisConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The `period` value is not a `START-END` year range.
    #[error(transparent)]
    InvalidPeriod(#[from] airline_risk_flight_models::InvalidYearRangeError),
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file to analyze. Sample data is generated when unset.
    pub csv: Option<PathBuf>,
    /// Number of records the sample generator produces.
    pub sample_records: usize,
    /// Seed for reproducible sample data.
    pub seed: Option<u64>,
    /// Use sample data when the CSV file cannot be read.
    pub fallback_to_sample: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv: None,
            sample_records: airline_risk_source::sample::DEFAULT_SAMPLE_SIZE,
            seed: None,
            fallback_to_sample: true,
        }
    }
}

/// Everything a run needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Airlines to report on, in display order. Empty means every airline
    /// in the dataset.
    pub airlines: Vec<String>,
    /// Year range to restrict records to, e.g. `"2020-2024"`.
    pub period: Option<String>,
    /// Dataset source.
    pub data: DataConfig,
}

/// Command-line values that replace configured ones when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub csv: Option<PathBuf>,
    pub airlines: Option<Vec<String>>,
    pub period: Option<String>,
    pub seed: Option<u64>,
    pub records: Option<usize>,
}

impl AnalysisConfig {
    /// Loads the config at `path`, or the embedded default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or its
    /// period is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)?
            }
            None => Self::parse(DEFAULT_CONFIG)?,
        };
        Ok(config)
    }

    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on invalid TOML or a malformed period.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.period_range()?;
        Ok(config)
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPeriod`] if the overridden period is
    /// malformed.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(csv) = overrides.csv {
            self.data.csv = Some(csv);
        }
        if let Some(airlines) = overrides.airlines {
            self.airlines = airlines
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
        }
        if let Some(period) = overrides.period {
            self.period = Some(period);
        }
        if let Some(seed) = overrides.seed {
            self.data.seed = Some(seed);
        }
        if let Some(records) = overrides.records {
            self.data.sample_records = records;
        }
        self.period_range()?;
        Ok(self)
    }

    /// The configured period as a [`YearRange`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPeriod`] if the period is malformed.
    pub fn period_range(&self) -> Result<Option<YearRange>, ConfigError> {
        Ok(self.period.as_deref().map(str::parse::<YearRange>).transpose()?)
    }
}
