use super::bands::Projection;
use super::domain::{Confidence, EstimationResult, Profile, SalaryBand};
use super::EstimationError;
use tracing::error;

/// Packs the pipeline outputs into a result, refusing anything whose bands
/// are out of order or whose score leaves `[0, 100]`.
pub(crate) fn assemble(
    projection: Projection,
    confidence: Confidence,
    drivers: Vec<String>,
    tips: Vec<String>,
    profile: Profile,
) -> Result<EstimationResult, EstimationError> {
    for (horizon, band) in [
        ("starting", &projection.starting),
        ("year5", &projection.year5),
        ("year10", &projection.year10),
    ] {
        ensure_ordered(horizon, band)?;
    }

    if confidence.score > 100 {
        error!(score = confidence.score, "confidence score out of range");
        return Err(EstimationError::InvariantViolation(format!(
            "confidence score {} exceeds 100",
            confidence.score
        )));
    }

    Ok(EstimationResult {
        starting: projection.starting,
        year5: projection.year5,
        year10: projection.year10,
        confidence,
        drivers,
        tips,
        inputs_used: profile,
    })
}

fn ensure_ordered(horizon: &str, band: &SalaryBand) -> Result<(), EstimationError> {
    if band.is_ordered() {
        return Ok(());
    }

    error!(
        horizon,
        low = band.low,
        mid = band.mid,
        high = band.high,
        "salary band out of order"
    );
    Err(EstimationError::InvariantViolation(format!(
        "{horizon} band is not ordered (low {}, mid {}, high {})",
        band.low, band.mid, band.high
    )))
}
