use serde_json::json;

use crate::estimation::{EstimatorConfig, Profile, ReferenceDataset, SalaryEstimator};

pub(super) fn fixture_dataset() -> ReferenceDataset {
    ReferenceDataset::from_value(json!({
        "major_groups": {
            "Engineering": { "starting_base": 70000, "growth_5y_pct": 0.5, "growth_10y_pct": 1.0 },
            "Education": { "starting_base": 44000, "growth_5y_pct": 0.2, "growth_10y_pct": 0.4 }
        },
        "regions": [
            { "name": "West", "adjustment": 1.08 },
            { "name": "Midwest", "adjustment": 0.95 }
        ],
        "school_tier_multipliers": { "Tier1": 1.12, "Tier3": 1.0 },
        "skills": { "Python": 0.03, "SQL": 0.025, "Excel": 0.01 },
        "high_cost_metro_multiplier": 1.1,
        "max_skills_boost": 0.1
    }))
    .expect("fixture dataset is valid")
}

pub(super) fn estimator() -> SalaryEstimator {
    SalaryEstimator::new(EstimatorConfig {
        reference_year: Some(2025),
        ..EstimatorConfig::default()
    })
}

pub(super) fn engineer() -> Profile {
    Profile {
        major_group: "Engineering".to_string(),
        region: "West".to_string(),
        school_tier: "Tier1".to_string(),
        graduation_year: Some(2025),
        gpa: Some(3.8),
        internships: 2,
        work_experience_years: 0.0,
        high_cost_metro: true,
        skills: ["Python", "SQL"].into_iter().map(str::to_string).collect(),
    }
}
