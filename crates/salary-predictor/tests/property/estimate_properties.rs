use proptest::prelude::*;
use salary_predictor::{EstimatorConfig, Profile, ReferenceDataset, SalaryEstimator};
use std::collections::BTreeSet;

const MAJORS: &[&str] = &["Engineering", "Business", "Education", "Other/Unknown", "Juggling"];
const REGIONS: &[&str] = &["Northeast", "Midwest", "South", "West", "", "Mars"];
const TIERS: &[&str] = &["Tier1", "Tier2", "Tier3", "Community College", "tier1", "Tier9"];
const SKILLS: &[&str] = &[
    "Python",
    "SQL",
    "Cloud",
    "Excel",
    "Machine Learning",
    "Communication",
    "Knitting",
];

fn estimator() -> SalaryEstimator {
    SalaryEstimator::new(EstimatorConfig {
        reference_year: Some(2025),
        ..EstimatorConfig::default()
    })
}

fn dataset() -> ReferenceDataset {
    ReferenceDataset::standard().expect("bundled dataset")
}

fn profiles() -> impl Strategy<Value = Profile> {
    (
        (
            prop::sample::select(MAJORS),
            prop::sample::select(REGIONS),
            prop::sample::select(TIERS),
            prop::option::of(1960i32..2040),
        ),
        (
            prop::option::of(-1.0f64..6.0),
            0u32..12,
            -2.0f64..60.0,
            any::<bool>(),
            prop::sample::subsequence(SKILLS, 0..=SKILLS.len()),
        ),
    )
        .prop_map(
            |(
                (major, region, tier, graduation_year),
                (gpa, internships, experience, metro, skills),
            )| Profile {
                major_group: major.to_string(),
                region: region.to_string(),
                school_tier: tier.to_string(),
                graduation_year,
                gpa,
                internships,
                work_experience_years: experience,
                high_cost_metro: metro,
                skills: skills.into_iter().map(str::to_string).collect::<BTreeSet<_>>(),
            },
        )
}

proptest! {
    #[test]
    fn bands_are_always_ordered(profile in profiles()) {
        let result = estimator().estimate(&profile, &dataset()).expect("estimate succeeds");

        for band in [result.starting, result.year5, result.year10] {
            prop_assert!(band.low <= band.mid && band.mid <= band.high, "{:?}", band);
        }
    }

    #[test]
    fn confidence_stays_in_range(profile in profiles()) {
        let result = estimator().estimate(&profile, &dataset()).expect("estimate succeeds");

        prop_assert!(result.confidence.score <= 100);
        prop_assert!(result.confidence.score >= EstimatorConfig::default().confidence_floor);
        prop_assert!(!result.confidence.reasons.is_empty());
    }

    #[test]
    fn more_internships_never_lower_starting_mid(profile in profiles(), extra in 1u32..5) {
        let dataset = dataset();
        let fewer = estimator().estimate(&profile, &dataset).expect("estimate succeeds");
        let more = estimator()
            .estimate(
                &Profile {
                    internships: profile.internships + extra,
                    ..profile.clone()
                },
                &dataset,
            )
            .expect("estimate succeeds");

        prop_assert!(more.starting.mid >= fewer.starting.mid);
    }

    #[test]
    fn adding_a_known_skill_never_lowers_starting_mid(
        profile in profiles(),
        skill in prop::sample::select(SKILLS),
    ) {
        let dataset = dataset();
        let mut with_skill = profile.clone();
        with_skill.skills.insert(skill.to_string());

        let before = estimator().estimate(&profile, &dataset).expect("estimate succeeds");
        let after = estimator().estimate(&with_skill, &dataset).expect("estimate succeeds");

        prop_assert!(after.starting.mid >= before.starting.mid);
    }

    #[test]
    fn estimates_are_deterministic(profile in profiles()) {
        let dataset = dataset();
        let first = estimator().estimate(&profile, &dataset).expect("estimate succeeds");
        let second = estimator().estimate(&profile, &dataset).expect("estimate succeeds");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn tips_never_exceed_limit(profile in profiles()) {
        let result = estimator().estimate(&profile, &dataset()).expect("estimate succeeds");

        prop_assert!(result.tips.len() <= EstimatorConfig::default().max_tips);
        prop_assert!(result.drivers.len() <= EstimatorConfig::default().max_drivers);
        prop_assert!(!result.drivers.is_empty());
    }
}
