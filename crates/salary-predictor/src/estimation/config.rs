use serde::{Deserialize, Serialize};

/// Tunable constants behind every numeric policy of the estimator.
///
/// None of these are part of the output contract; hosts may override any
/// subset from a JSON tuning file (see `AppConfig::load`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub base_spread_pct: f64,
    pub year5_spread_factor: f64,
    pub year10_spread_factor: f64,
    pub low_confidence_threshold: u8,
    pub low_confidence_spread_factor: f64,
    pub gpa_neutral_threshold: f64,
    pub gpa_bump_per_point: f64,
    pub gpa_bump_cap: f64,
    pub internship_step_pct: f64,
    pub internship_decay: f64,
    pub internship_saturation_cap: u32,
    pub high_cost_metro_multiplier: f64,
    pub max_skill_bonus_pct: f64,
    pub experience_cap_years: f64,
    pub late_career_growth_damping: f64,
    pub penalties: ConfidencePenalties,
    pub confidence_floor: u8,
    pub graduation_years_back: i32,
    pub graduation_years_ahead: i32,
    /// Calendar year used for graduation-year plausibility checks. `None`
    /// skips the check so estimates never depend on the clock.
    pub reference_year: Option<i32>,
    pub max_drivers: usize,
    pub max_tips: usize,
    pub gpa_tip_threshold: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_spread_pct: 0.12,
            year5_spread_factor: 1.5,
            year10_spread_factor: 2.0,
            low_confidence_threshold: 60,
            low_confidence_spread_factor: 1.5,
            gpa_neutral_threshold: 3.0,
            gpa_bump_per_point: 0.04,
            gpa_bump_cap: 0.04,
            internship_step_pct: 0.05,
            internship_decay: 0.6,
            internship_saturation_cap: 3,
            high_cost_metro_multiplier: 1.10,
            max_skill_bonus_pct: 0.10,
            experience_cap_years: 10.0,
            late_career_growth_damping: 0.5,
            penalties: ConfidencePenalties::default(),
            confidence_floor: 35,
            graduation_years_back: 40,
            graduation_years_ahead: 6,
            reference_year: None,
            max_drivers: 4,
            max_tips: 6,
            gpa_tip_threshold: 3.5,
        }
    }
}

/// Points subtracted from the confidence score per source of uncertainty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePenalties {
    pub unknown_major: u8,
    pub unknown_region: u8,
    pub unknown_school_tier: u8,
    pub graduation_year: u8,
    pub missing_gpa: u8,
    pub no_skills: u8,
    pub no_practical_experience: u8,
}

impl Default for ConfidencePenalties {
    fn default() -> Self {
        Self {
            unknown_major: 20,
            unknown_region: 15,
            unknown_school_tier: 10,
            graduation_year: 8,
            missing_gpa: 8,
            no_skills: 8,
            no_practical_experience: 8,
        }
    }
}

impl EstimatorConfig {
    /// Replaces values that would break band ordering or produce non-finite
    /// output with their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();

        Self {
            base_spread_pct: unit_interval_or(self.base_spread_pct, defaults.base_spread_pct),
            year5_spread_factor: non_negative_or(
                self.year5_spread_factor,
                defaults.year5_spread_factor,
            ),
            year10_spread_factor: non_negative_or(
                self.year10_spread_factor,
                defaults.year10_spread_factor,
            ),
            low_confidence_threshold: self.low_confidence_threshold.min(100),
            low_confidence_spread_factor: non_negative_or(
                self.low_confidence_spread_factor,
                defaults.low_confidence_spread_factor,
            ),
            gpa_neutral_threshold: if self.gpa_neutral_threshold.is_finite() {
                self.gpa_neutral_threshold.clamp(0.0, 4.0)
            } else {
                defaults.gpa_neutral_threshold
            },
            gpa_bump_per_point: non_negative_or(
                self.gpa_bump_per_point,
                defaults.gpa_bump_per_point,
            ),
            gpa_bump_cap: non_negative_or(self.gpa_bump_cap, defaults.gpa_bump_cap),
            internship_step_pct: non_negative_or(
                self.internship_step_pct,
                defaults.internship_step_pct,
            ),
            internship_decay: unit_interval_or(self.internship_decay, defaults.internship_decay),
            internship_saturation_cap: self.internship_saturation_cap,
            high_cost_metro_multiplier: non_negative_or(
                self.high_cost_metro_multiplier,
                defaults.high_cost_metro_multiplier,
            ),
            max_skill_bonus_pct: non_negative_or(
                self.max_skill_bonus_pct,
                defaults.max_skill_bonus_pct,
            ),
            experience_cap_years: non_negative_or(
                self.experience_cap_years,
                defaults.experience_cap_years,
            ),
            late_career_growth_damping: unit_interval_or(
                self.late_career_growth_damping,
                defaults.late_career_growth_damping,
            ),
            penalties: self.penalties,
            confidence_floor: self.confidence_floor.min(100),
            graduation_years_back: self.graduation_years_back.max(0),
            graduation_years_ahead: self.graduation_years_ahead.max(0),
            reference_year: self.reference_year,
            max_drivers: self.max_drivers,
            max_tips: self.max_tips,
            gpa_tip_threshold: if self.gpa_tip_threshold.is_finite() {
                self.gpa_tip_threshold
            } else {
                defaults.gpa_tip_threshold
            },
        }
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

fn unit_interval_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        value
    } else {
        fallback
    }
}
