use super::config::EstimatorConfig;
use super::dataset::MajorBaseline;
use super::domain::{Profile, ResolvedFactors, SalaryBand};

/// Salary bands at the three reported horizons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projection {
    pub starting: SalaryBand,
    pub year5: SalaryBand,
    pub year10: SalaryBand,
}

/// Combines resolved factors into starting, five-year, and ten-year bands.
///
/// Band width grows with the horizon and widens further when confidence is
/// below the configured threshold.
pub(crate) fn project(
    profile: &Profile,
    factors: &ResolvedFactors,
    growth: &MajorBaseline,
    confidence_score: u8,
    config: &EstimatorConfig,
) -> Projection {
    let starting_mid = starting_mid(factors);

    let mut spread = config.base_spread_pct;
    if confidence_score < config.low_confidence_threshold {
        spread *= config.low_confidence_spread_factor;
    }

    let experience = profile
        .work_experience_years
        .clamp(0.0, config.experience_cap_years);
    let year5_mid = starting_mid * growth_multiplier(5.0 + experience, growth, config);
    let year10_mid = starting_mid * growth_multiplier(10.0 + experience, growth, config);

    Projection {
        starting: band(starting_mid, spread),
        year5: band(year5_mid, spread * config.year5_spread_factor),
        year10: band(year10_mid, spread * config.year10_spread_factor),
    }
}

/// `base × Π multipliers + Σ additive`, floored at zero.
pub(crate) fn starting_mid(factors: &ResolvedFactors) -> f64 {
    let mid = factors.baseline() * factors.multiplier_product() + factors.additive_total();
    if mid.is_finite() {
        mid.max(0.0)
    } else {
        0.0
    }
}

/// Piecewise-linear growth curve through `g(0) = 1`, `g(5) = 1 + growth_5y`,
/// `g(10) = 1 + growth_10y`, continuing past ten years at the damped 5→10 slope.
pub(crate) fn growth_multiplier(years: f64, growth: &MajorBaseline, config: &EstimatorConfig) -> f64 {
    let at5 = 1.0 + growth.growth_5y_pct;
    let at10 = 1.0 + growth.growth_10y_pct;

    let value = if years <= 5.0 {
        1.0 + growth.growth_5y_pct * (years / 5.0)
    } else if years <= 10.0 {
        at5 + (at10 - at5) * ((years - 5.0) / 5.0)
    } else {
        let slope = (at10 - at5) / 5.0;
        at10 + slope * config.late_career_growth_damping * (years - 10.0)
    };

    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn band(mid: f64, spread: f64) -> SalaryBand {
    let spread = spread.clamp(0.0, 1.0);
    SalaryBand {
        low: whole_units(mid * (1.0 - spread)),
        mid: whole_units(mid),
        high: whole_units(mid * (1.0 + spread)),
    }
}

fn whole_units(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}
