use super::common::*;
use crate::estimation::{
    estimate, EstimatorConfig, Profile, SalaryBand, SalaryEstimator, UNKNOWN_BUCKET,
};

#[test]
fn complete_profile_compounds_every_factor() {
    let result = estimator()
        .estimate(&engineer(), &fixture_dataset())
        .expect("estimate succeeds");

    assert_eq!(result.starting.mid, 107659);
    assert_eq!(result.starting.low, 94740);
    assert_eq!(result.starting.high, 120578);
    assert_eq!(result.year5.mid, 161489);
    assert_eq!(result.year10.mid, 215318);
    assert_eq!(result.confidence.score, 100);
    assert!(result.drivers[0].starts_with("School tier multiplier (Tier1)"));
}

#[test]
fn unknown_major_uses_fallback_baseline_and_growth() {
    let profile = Profile {
        major_group: "Underwater Basketry".to_string(),
        ..engineer()
    };

    let result = estimator()
        .estimate(&profile, &fixture_dataset())
        .expect("fallback estimate succeeds");

    assert_eq!(result.inputs_used.major_group, UNKNOWN_BUCKET);
    assert_eq!(result.starting.mid, 87665);
    assert_eq!(result.year10.mid, 149031);
    assert_eq!(result.confidence.score, 80);
    assert!(result.confidence.reasons[0].contains("Other/Unknown"));
}

#[test]
fn sparse_profile_widens_bands_and_explains_baseline() {
    let result = estimator()
        .estimate(&Profile::default(), &fixture_dataset())
        .expect("sparse estimate succeeds");

    assert_eq!(result.confidence.score, 35);
    assert_eq!(
        result.starting,
        SalaryBand {
            low: 46740,
            mid: 57000,
            high: 67260
        }
    );
    assert_eq!(
        result.drivers,
        vec!["Major baseline (Other/Unknown): $57,000 with no further adjustments".to_string()]
    );
    assert!(!result.tips.is_empty());
}

#[test]
fn estimate_canonicalizes_loose_profiles() {
    let profile = Profile {
        region: " west ".to_string(),
        skills: ["python", "SQL", "Juggling"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        ..engineer()
    };

    let loose = estimator()
        .estimate(&profile, &fixture_dataset())
        .expect("loose estimate succeeds");
    let strict = estimator()
        .estimate(&engineer(), &fixture_dataset())
        .expect("strict estimate succeeds");

    assert_eq!(loose, strict);
    assert_eq!(loose.inputs_used.region, "West");
}

#[test]
fn graduation_window_follows_reference_year() {
    let estimator = SalaryEstimator::new(EstimatorConfig {
        reference_year: Some(2100),
        ..EstimatorConfig::default()
    });

    let result = estimator
        .estimate(&engineer(), &fixture_dataset())
        .expect("estimate succeeds");

    assert_eq!(estimator.reference_year(), Some(2100));
    assert_eq!(result.confidence.score, 92);
}

#[test]
fn free_estimate_ignores_the_clock() {
    let dataset = fixture_dataset();
    let far_future = Profile {
        graduation_year: Some(2038),
        ..engineer()
    };

    let result = estimate(&far_future, &dataset).expect("estimate succeeds");
    let pinned_none = SalaryEstimator::new(EstimatorConfig::default())
        .estimate(&far_future, &dataset)
        .expect("estimate succeeds");

    assert_eq!(SalaryEstimator::default().reference_year(), None);
    assert_eq!(result, pinned_none);
    assert_eq!(result.confidence.score, 100);

    for year in [2031, 2032, 2040] {
        let pinned = SalaryEstimator::new(EstimatorConfig {
            reference_year: Some(year),
            ..EstimatorConfig::default()
        })
        .estimate(&far_future, &dataset)
        .expect("estimate succeeds");
        assert_eq!(pinned.starting.mid, result.starting.mid);
    }
}

#[test]
fn invalid_tuning_is_sanitized() {
    let estimator = SalaryEstimator::new(EstimatorConfig {
        base_spread_pct: -1.0,
        internship_decay: f64::NAN,
        reference_year: Some(2025),
        ..EstimatorConfig::default()
    });

    assert_eq!(estimator.config().base_spread_pct, 0.12);
    assert_eq!(estimator.config().internship_decay, 0.6);

    let result = estimator
        .estimate(&engineer(), &fixture_dataset())
        .expect("estimate succeeds");
    assert!(result.starting.is_ordered());
}
