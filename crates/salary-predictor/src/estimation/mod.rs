//! Salary trajectory estimation.
//!
//! [`SalaryEstimator::estimate`] is a pure function of a profile and a
//! [`ReferenceDataset`]: it canonicalizes the profile, resolves one factor per
//! dimension, scores confidence, projects starting, five-year, and ten-year
//! bands, and explains the result. Confidence is scored before projection
//! because low confidence widens every band.

mod assemble;
mod bands;
mod confidence;
pub mod config;
pub mod dataset;
pub mod domain;
mod explain;
mod factors;

#[cfg(test)]
mod tests;

pub use config::{ConfidencePenalties, EstimatorConfig};
pub use dataset::{DatasetError, MajorBaseline, ReferenceDataset, RegionAdjustment};
pub use domain::{
    Confidence, Dimension, EstimationResult, FactorKind, FactorSource, Profile, ResolvedFactor,
    ResolvedFactors, SalaryBand, UNKNOWN_BUCKET,
};

use crate::intake::{self, RawProfile};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    /// Input that cannot be coerced to any default, including a structurally
    /// broken reference dataset.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The pipeline produced an inconsistent result. Always a bug.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<DatasetError> for EstimationError {
    fn from(value: DatasetError) -> Self {
        Self::MalformedInput(value.to_string())
    }
}

/// Stateless estimator holding sanitized tuning.
///
/// Cheap to clone and safe to share across threads; every call reads only its
/// arguments and never the clock. Without a configured reference year the
/// graduation-year plausibility window is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryEstimator {
    config: EstimatorConfig,
}

impl Default for SalaryEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl SalaryEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn reference_year(&self) -> Option<i32> {
        self.config.reference_year
    }

    pub fn estimate(
        &self,
        profile: &Profile,
        dataset: &ReferenceDataset,
    ) -> Result<EstimationResult, EstimationError> {
        let profile = intake::canonicalize(profile.clone(), dataset);
        let factors = factors::resolve(&profile, dataset, &self.config);

        for factor in factors
            .iter()
            .filter(|factor| factor.source == FactorSource::Fallback)
        {
            warn!(
                dimension = factor.dimension.label(),
                "category not in reference dataset; using fallback"
            );
        }
        debug!(
            baseline = factors.baseline(),
            multiplier = factors.multiplier_product(),
            additive = factors.additive_total(),
            "resolved salary factors"
        );

        let growth = if factors.is_fallback(Dimension::MajorBaseline) {
            dataset.fallback_major()
        } else {
            dataset
                .major(&profile.major_group)
                .unwrap_or_else(|| dataset.fallback_major())
        };

        let confidence =
            confidence::score(&profile, &factors, self.config.reference_year, &self.config);
        let projection = bands::project(&profile, &factors, growth, confidence.score, &self.config);
        let drivers = explain::drivers(&factors, &self.config);
        let tips = explain::tips(&profile, &factors, dataset, &self.config);

        let result = assemble::assemble(projection, confidence, drivers, tips, profile)?;
        debug!(
            starting_mid = result.starting.mid,
            year5_mid = result.year5.mid,
            year10_mid = result.year10.mid,
            confidence = result.confidence.score,
            "salary estimate produced"
        );

        Ok(result)
    }

    /// Normalizes a loosely-typed payload, then estimates.
    pub fn estimate_raw(
        &self,
        raw: &RawProfile,
        dataset: &ReferenceDataset,
    ) -> Result<EstimationResult, EstimationError> {
        let profile = intake::normalize(raw, dataset);
        self.estimate(&profile, dataset)
    }

    /// Estimates from a JSON object payload. Invalid JSON and non-object
    /// payloads are rejected; oddly typed fields degrade like missing ones.
    pub fn estimate_json(
        &self,
        payload: &str,
        dataset: &ReferenceDataset,
    ) -> Result<EstimationResult, EstimationError> {
        let value: serde_json::Value = serde_json::from_str(payload).map_err(|err| {
            EstimationError::MalformedInput(format!("profile payload is not valid JSON: {err}"))
        })?;

        if !value.is_object() {
            return Err(EstimationError::MalformedInput(
                "profile payload must be a JSON object".to_string(),
            ));
        }

        let raw: RawProfile = serde_json::from_value(value).map_err(|err| {
            EstimationError::MalformedInput(format!("profile payload has an invalid field: {err}"))
        })?;

        self.estimate_raw(&raw, dataset)
    }
}

/// Estimates with default tuning and no graduation-year window.
pub fn estimate(
    profile: &Profile,
    dataset: &ReferenceDataset,
) -> Result<EstimationResult, EstimationError> {
    SalaryEstimator::default().estimate(profile, dataset)
}
