//! Risk score calculation and categorization.
//!
//! A computed score is the severity-weighted record count per flight,
//! expressed as a percentage and capped at [`MAX_RISK_SCORE`]:
//!
//! ```text
//! score = min((3·High + 2·Medium + 1·Low) / records · 100, 100)
//! ```
//!
//! Every record counts, including flights with no incident, since severity
//! is recorded on every row.

use airline_risk_flight_models::{Dataset, IncidentRecord};
use airline_risk_models::{RiskAssessment, RiskCategory};

/// Upper bound for computed scores.
pub const MAX_RISK_SCORE: f64 = 100.0;

/// Scores at or above this value are [`RiskCategory::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 20.0;

/// Scores at or above this value are [`RiskCategory::High`].
pub const HIGH_THRESHOLD: f64 = 50.0;

/// Computes the risk score for `airline`.
///
/// When the dataset carries a `Risk_Score` column and the airline's first
/// record has a value, that value is returned as-is (not clamped). Otherwise
/// the score is computed from the airline's records with
/// [`weighted_score`]. An airline with no records scores `0.0`.
///
/// An empty `Risk_Score` cell on that first record is not treated as `NaN`:
/// it falls through to the computed score.
#[must_use]
pub fn compute_risk_score(airline: &str, dataset: &Dataset) -> f64 {
    if dataset.has_risk_scores
        && let Some(score) = dataset
            .records_for(airline)
            .next()
            .and_then(|r| r.risk_score)
    {
        log::trace!("Using supplied risk score {score} for {airline}");
        return score;
    }

    weighted_score(dataset.records_for(airline))
}

/// Severity-weighted score over an arbitrary set of records.
///
/// Returns `0.0` for an empty set; never exceeds [`MAX_RISK_SCORE`].
#[must_use]
pub fn weighted_score<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let (total, weighted) = records.into_iter().fold((0_u64, 0_u64), |(n, w), r| {
        (n + 1, w + u64::from(r.severity.weight()))
    });

    if total == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let score = weighted as f64 / total as f64 * 100.0;

    score.min(MAX_RISK_SCORE)
}

/// Buckets a score: below 20 is Low, below 50 is Medium, otherwise High.
///
/// `NaN` compares false against both cut-offs and lands in High.
#[must_use]
pub fn categorize(score: f64) -> RiskCategory {
    if score < MEDIUM_THRESHOLD {
        RiskCategory::Low
    } else if score < HIGH_THRESHOLD {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

/// Scores and categorizes a single airline.
#[must_use]
pub fn assess(airline: &str, dataset: &Dataset) -> RiskAssessment {
    let risk_score = compute_risk_score(airline, dataset);
    RiskAssessment {
        airline: airline.to_string(),
        risk_score,
        category: categorize(risk_score),
    }
}
