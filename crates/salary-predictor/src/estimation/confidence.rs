use super::config::EstimatorConfig;
use super::domain::{Confidence, Dimension, Profile, ResolvedFactors};

const MAX_SCORE: i32 = 100;

/// Scores how much of the estimate rests on specific inputs rather than
/// defaults. Reasons are appended in penalty order. The graduation-year
/// window is only checked against a known reference year.
pub(crate) fn score(
    profile: &Profile,
    factors: &ResolvedFactors,
    reference_year: Option<i32>,
    config: &EstimatorConfig,
) -> Confidence {
    let penalties = &config.penalties;
    let mut score = MAX_SCORE;
    let mut reasons = Vec::new();

    let mut penalize = |points: u8, reason: String| {
        score -= i32::from(points);
        reasons.push(reason);
    };

    if factors.is_fallback(Dimension::MajorBaseline) {
        penalize(
            penalties.unknown_major,
            "Major is Other/Unknown, so baseline matching is less precise.".to_string(),
        );
    }

    if factors.is_fallback(Dimension::Region) {
        penalize(
            penalties.unknown_region,
            "Region missing or unknown; no regional adjustment applied.".to_string(),
        );
    }

    if factors.is_fallback(Dimension::SchoolTier) {
        penalize(
            penalties.unknown_school_tier,
            "School tier missing or unknown; no tier multiplier applied.".to_string(),
        );
    }

    match profile.graduation_year {
        None => penalize(
            penalties.graduation_year,
            "Graduation year missing.".to_string(),
        ),
        Some(year) if !within_window(year, reference_year, config) => {
            penalize(
                penalties.graduation_year,
                format!("Graduation year {year} is outside the typical range."),
            )
        }
        Some(_) => {}
    }

    if profile.gpa.is_none() {
        penalize(penalties.missing_gpa, "GPA not provided.".to_string());
    }

    if profile.skills.is_empty() {
        penalize(penalties.no_skills, "No recognized skills selected.".to_string());
    }

    if profile.internships == 0 && profile.work_experience_years <= 0.0 {
        penalize(
            penalties.no_practical_experience,
            "No internships or work experience reported.".to_string(),
        );
    }

    if reasons.is_empty() {
        reasons.push("Inputs are complete and align with dataset categories.".to_string());
    }

    let floor = i32::from(config.confidence_floor.min(100));
    Confidence {
        score: score.clamp(floor, MAX_SCORE) as u8,
        reasons,
    }
}

fn within_window(year: i32, reference_year: Option<i32>, config: &EstimatorConfig) -> bool {
    match reference_year {
        Some(reference) => {
            year >= reference.saturating_sub(config.graduation_years_back)
                && year <= reference.saturating_add(config.graduation_years_ahead)
        }
        None => true,
    }
}
