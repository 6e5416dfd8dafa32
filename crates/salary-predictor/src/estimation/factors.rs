use super::config::EstimatorConfig;
use super::dataset::ReferenceDataset;
use super::domain::{
    Dimension, FactorKind, FactorSource, Profile, ResolvedFactor, ResolvedFactors, UNKNOWN_BUCKET,
};

/// Looks up every profile dimension in fixed order:
/// major, region, tier, GPA, internships, metro, skills.
pub(crate) fn resolve(
    profile: &Profile,
    dataset: &ReferenceDataset,
    config: &EstimatorConfig,
) -> ResolvedFactors {
    let mut factors = Vec::with_capacity(Dimension::ordered().len());

    let (major_baseline, major_source) = match known(&profile.major_group)
        .and_then(|major| dataset.major(major))
    {
        Some(baseline) => (*baseline, FactorSource::Dataset),
        None => (*dataset.fallback_major(), FactorSource::Fallback),
    };
    factors.push(ResolvedFactor {
        dimension: Dimension::MajorBaseline,
        kind: FactorKind::Baseline,
        value: major_baseline.starting_base,
        source: major_source,
        detail: profile.major_group.clone(),
    });

    factors.push(category_factor(
        Dimension::Region,
        &profile.region,
        known(&profile.region).and_then(|region| dataset.region_adjustment(region)),
    ));

    factors.push(category_factor(
        Dimension::SchoolTier,
        &profile.school_tier,
        known(&profile.school_tier).and_then(|tier| dataset.school_tier_multiplier(tier)),
    ));

    factors.push(gpa_factor(profile.gpa, config));
    factors.push(internship_factor(profile.internships, config));

    let metro_multiplier = dataset
        .high_cost_metro_multiplier()
        .unwrap_or(config.high_cost_metro_multiplier);
    factors.push(ResolvedFactor {
        dimension: Dimension::HighCostMetro,
        kind: FactorKind::Multiplicative,
        value: if profile.high_cost_metro {
            metro_multiplier
        } else {
            1.0
        },
        source: FactorSource::Profile,
        detail: if profile.high_cost_metro {
            "high-cost metro".to_string()
        } else {
            "standard cost of living".to_string()
        },
    });

    factors.push(skills_factor(
        profile,
        dataset,
        major_baseline.starting_base,
        config,
    ));

    ResolvedFactors::new(factors)
}

fn known(category: &str) -> Option<&str> {
    (category != UNKNOWN_BUCKET).then_some(category)
}

fn category_factor(dimension: Dimension, label: &str, value: Option<f64>) -> ResolvedFactor {
    match value {
        Some(value) => ResolvedFactor {
            dimension,
            kind: FactorKind::Multiplicative,
            value,
            source: FactorSource::Dataset,
            detail: label.to_string(),
        },
        None => ResolvedFactor {
            dimension,
            kind: FactorKind::Multiplicative,
            value: 1.0,
            source: FactorSource::Fallback,
            detail: UNKNOWN_BUCKET.to_string(),
        },
    }
}

/// GPA helps above the neutral threshold and never penalizes below it.
fn gpa_factor(gpa: Option<f64>, config: &EstimatorConfig) -> ResolvedFactor {
    match gpa {
        Some(gpa) => {
            let above = (gpa - config.gpa_neutral_threshold).max(0.0);
            let bump = (above * config.gpa_bump_per_point).min(config.gpa_bump_cap);
            ResolvedFactor {
                dimension: Dimension::Gpa,
                kind: FactorKind::Multiplicative,
                value: 1.0 + bump,
                source: FactorSource::Profile,
                detail: format!("{gpa:.2} GPA"),
            }
        }
        None => ResolvedFactor {
            dimension: Dimension::Gpa,
            kind: FactorKind::Multiplicative,
            value: 1.0,
            source: FactorSource::NotProvided,
            detail: "GPA not provided".to_string(),
        },
    }
}

/// Each internship adds a geometrically shrinking step until the cap.
pub(crate) fn internship_multiplier(internships: u32, config: &EstimatorConfig) -> f64 {
    let counted = internships.min(config.internship_saturation_cap);
    let mut step = config.internship_step_pct;
    let mut multiplier = 1.0;
    for _ in 0..counted {
        multiplier += step;
        step *= config.internship_decay;
    }
    multiplier
}

fn internship_factor(internships: u32, config: &EstimatorConfig) -> ResolvedFactor {
    let detail = if internships > config.internship_saturation_cap {
        format!(
            "{internships} internships, counted up to {}",
            config.internship_saturation_cap
        )
    } else {
        format!(
            "{internships} internship{}",
            if internships == 1 { "" } else { "s" }
        )
    };

    ResolvedFactor {
        dimension: Dimension::Internships,
        kind: FactorKind::Multiplicative,
        value: internship_multiplier(internships, config),
        source: FactorSource::Profile,
        detail,
    }
}

/// Skill weights are fractions of the major's starting base; the aggregate is
/// capped before being converted into currency.
fn skills_factor(
    profile: &Profile,
    dataset: &ReferenceDataset,
    starting_base: f64,
    config: &EstimatorConfig,
) -> ResolvedFactor {
    let matched: Vec<&str> = profile
        .skills
        .iter()
        .filter(|skill| dataset.skill_weight(skill).is_some())
        .map(String::as_str)
        .collect();

    if matched.is_empty() {
        return ResolvedFactor {
            dimension: Dimension::Skills,
            kind: FactorKind::Additive,
            value: 0.0,
            source: FactorSource::NotProvided,
            detail: "no recognized skills".to_string(),
        };
    }

    let cap = dataset
        .max_skills_boost()
        .unwrap_or(config.max_skill_bonus_pct);
    let total: f64 = matched
        .iter()
        .filter_map(|skill| dataset.skill_weight(skill))
        .sum();

    ResolvedFactor {
        dimension: Dimension::Skills,
        kind: FactorKind::Additive,
        value: total.min(cap) * starting_base,
        source: FactorSource::Dataset,
        detail: matched.join(", "),
    }
}
