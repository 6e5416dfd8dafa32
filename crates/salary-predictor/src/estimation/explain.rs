use super::config::EstimatorConfig;
use super::dataset::ReferenceDataset;
use super::domain::{
    Dimension, FactorKind, FactorSource, Profile, ResolvedFactor, ResolvedFactors,
};
use std::cmp::Ordering;

const MIN_TIPS: usize = 4;
const SUGGESTED_SKILLS: usize = 2;

/// Ranks non-neutral factors by their percent effect on the starting mid.
pub(crate) fn drivers(factors: &ResolvedFactors, config: &EstimatorConfig) -> Vec<String> {
    let adjusted_base = factors.baseline() * factors.multiplier_product();

    let mut ranked: Vec<(&ResolvedFactor, f64)> = factors
        .iter()
        .filter(|factor| factor.kind != FactorKind::Baseline && !factor.is_neutral())
        .map(|factor| (factor, percent_effect(factor, adjusted_base)))
        .collect();

    // Stable: equal magnitudes keep resolution order.
    ranked.sort_by(|left, right| {
        right
            .1
            .abs()
            .partial_cmp(&left.1.abs())
            .unwrap_or(Ordering::Equal)
    });

    let mut drivers: Vec<String> = ranked
        .into_iter()
        .take(config.max_drivers)
        .map(|(factor, percent)| {
            format!(
                "{} ({}): {:+.1}%",
                factor.dimension.label(),
                factor.detail,
                percent
            )
        })
        .collect();

    if drivers.is_empty() {
        if let Some(baseline) = factors.get(Dimension::MajorBaseline) {
            drivers.push(format!(
                "{} ({}): {} with no further adjustments",
                baseline.dimension.label(),
                baseline.detail,
                format_currency(baseline.value)
            ));
        }
    }

    drivers
}

fn percent_effect(factor: &ResolvedFactor, adjusted_base: f64) -> f64 {
    match factor.kind {
        FactorKind::Baseline => 0.0,
        FactorKind::Multiplicative => (factor.value - 1.0) * 100.0,
        FactorKind::Additive if adjusted_base > 0.0 => factor.value / adjusted_base * 100.0,
        FactorKind::Additive => 0.0,
    }
}

/// Actionable suggestions. Major group and graduation year are never
/// offered as something to change.
pub(crate) fn tips(
    profile: &Profile,
    factors: &ResolvedFactors,
    dataset: &ReferenceDataset,
    config: &EstimatorConfig,
) -> Vec<String> {
    let mut tips = Vec::new();

    let cap = config.internship_saturation_cap;
    if profile.internships == 0 && cap > 0 {
        tips.push("Get at least 1 internship to strengthen your starting offer potential.".to_string());
    } else if profile.internships < cap {
        tips.push(format!(
            "Add another internship or co-op; each one up to {cap} lifts early-career offers."
        ));
    }

    match profile.gpa {
        None => tips.push("Add your GPA if it is strong to improve estimate confidence.".to_string()),
        Some(gpa) if gpa < config.gpa_tip_threshold => tips.push(format!(
            "If possible, improve your GPA toward {:.1}+ for better recruiter filtering.",
            config.gpa_tip_threshold
        )),
        Some(_) => {}
    }

    let suggestions = suggested_skills(profile, dataset);
    if !suggestions.is_empty() {
        if profile.skills.is_empty() {
            tips.push(format!(
                "Add in-demand skills such as {}.",
                suggestions.join(" and ")
            ));
        } else if selected_skill_weight(profile, dataset) < skill_cap(dataset, config) {
            tips.push(format!(
                "Add high-value skills for your field: {}.",
                suggestions.join(", ")
            ));
        }
    }

    if factors.is_fallback(Dimension::SchoolTier) {
        tips.push("Specify your school tier so the matching multiplier can be applied.".to_string());
    } else if factors.get(Dimension::SchoolTier).is_some_and(|tier| {
        tier.source == FactorSource::Dataset && tier.value < 1.0
    }) {
        tips.push(
            "Use certifications and portfolio projects to offset school-tier signaling."
                .to_string(),
        );
    }

    if factors.is_fallback(Dimension::Region) {
        tips.push("Select your region to replace the neutral regional adjustment.".to_string());
    }

    if !profile.high_cost_metro {
        tips.push("Target higher-paying metro markets if location flexibility is possible.".to_string());
    }

    if profile.work_experience_years < 1.0 {
        tips.push(
            "Build practical experience via projects, part-time work, or freelance outcomes."
                .to_string(),
        );
    }

    if tips.len() < MIN_TIPS {
        tips.push("Network with alumni and tailor applications to role-specific outcomes.".to_string());
    }

    tips.truncate(config.max_tips);
    tips
}

/// Unselected skills: the major's focus list first, then the heaviest weights.
fn suggested_skills<'a>(profile: &Profile, dataset: &'a ReferenceDataset) -> Vec<&'a str> {
    let mut suggestions: Vec<&str> = dataset
        .skill_focus(&profile.major_group)
        .iter()
        .map(String::as_str)
        .filter(|skill| dataset.skill_weight(skill).is_some() && !profile.skills.contains(*skill))
        .collect();

    let mut by_weight: Vec<(&str, f64)> = dataset
        .skills()
        .iter()
        .filter(|(skill, _)| !profile.skills.contains(*skill))
        .map(|(skill, weight)| (skill.as_str(), *weight))
        .collect();
    by_weight.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal));

    for (skill, _) in by_weight {
        if suggestions.len() >= SUGGESTED_SKILLS {
            break;
        }
        if !suggestions.contains(&skill) {
            suggestions.push(skill);
        }
    }

    suggestions.truncate(SUGGESTED_SKILLS);
    suggestions
}

fn selected_skill_weight(profile: &Profile, dataset: &ReferenceDataset) -> f64 {
    profile
        .skills
        .iter()
        .filter_map(|skill| dataset.skill_weight(skill))
        .sum()
}

fn skill_cap(dataset: &ReferenceDataset, config: &EstimatorConfig) -> f64 {
    dataset
        .max_skills_boost()
        .unwrap_or(config.max_skill_bonus_pct)
}

pub(crate) fn format_currency(amount: f64) -> String {
    let whole = if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    };
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}
