#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Flight incident dataset providers.
//!
//! Each data source implements the [`DatasetProvider`] trait to produce a
//! [`Dataset`] for the risk engine. The presentation layer picks a provider
//! (an uploaded CSV file or the synthetic sample generator) and hands the
//! loaded dataset to the engine; the engine never touches I/O itself.

pub mod csv_file;
pub mod parsing;
pub mod progress;
pub mod sample;

use airline_risk_flight_models::Dataset;

pub use csv_file::{CsvProvider, write_dataset_csv};
pub use sample::SampleProvider;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// A cell could not be interpreted.
    #[error("Row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        /// 1-based data row number (header excluded).
        row: u64,
        /// Column the value came from.
        column: String,
        /// The rejected cell contents.
        value: String,
    },

    /// The synthetic generator was misconfigured.
    #[error("Sample generation error: {message}")]
    Sample {
        /// Description of what went wrong.
        message: String,
    },
}

/// A capability that produces a [`Dataset`].
pub trait DatasetProvider {
    /// Returns a human-readable description of this provider.
    fn name(&self) -> &str;

    /// Loads the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the data cannot be read or parsed.
    fn load(&self) -> Result<Dataset, SourceError>;
}

/// Which provider a [`LoadedDataset`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// The requested provider.
    Primary,
    /// The fallback provider, after the primary failed.
    Fallback,
}

/// A dataset along with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// The loaded records.
    pub dataset: Dataset,
    /// Whether the primary or the fallback provider supplied it.
    pub origin: DataOrigin,
    /// Name of the provider that supplied it.
    pub provider: String,
    /// Error message from the primary provider, if it failed.
    pub primary_error: Option<String>,
}

/// Loads from `primary`, falling back to `fallback` if `primary` fails.
///
/// # Errors
///
/// Returns the fallback provider's error if both providers fail.
pub fn load_with_fallback(
    primary: &dyn DatasetProvider,
    fallback: &dyn DatasetProvider,
) -> Result<LoadedDataset, SourceError> {
    match primary.load() {
        Ok(dataset) => {
            log::info!("Loaded {} records from {}", dataset.len(), primary.name());
            Ok(LoadedDataset {
                dataset,
                origin: DataOrigin::Primary,
                provider: primary.name().to_string(),
                primary_error: None,
            })
        }
        Err(e) => {
            log::warn!(
                "Failed to load {}: {e}. Using {} instead",
                primary.name(),
                fallback.name()
            );
            let dataset = fallback.load()?;
            log::info!("Loaded {} records from {}", dataset.len(), fallback.name());
            Ok(LoadedDataset {
                dataset,
                origin: DataOrigin::Fallback,
                provider: fallback.name().to_string(),
                primary_error: Some(e.to_string()),
            })
        }
    }
}

/// Loads from a single provider with no fallback.
///
/// # Errors
///
/// Returns [`SourceError`] if the provider fails.
pub fn load(provider: &dyn DatasetProvider) -> Result<LoadedDataset, SourceError> {
    let dataset = provider.load()?;
    log::info!("Loaded {} records from {}", dataset.len(), provider.name());
    Ok(LoadedDataset {
        dataset,
        origin: DataOrigin::Primary,
        provider: provider.name().to_string(),
        primary_error: None,
    })
}
