use super::common::*;
use crate::estimation::{EstimationError, UNKNOWN_BUCKET};
use crate::intake::RawProfile;

const ENGINEER_PAYLOAD: &str = r#"{
    "major_group": "engineering",
    "region": "West",
    "school_tier": "Tier1",
    "graduation_year": "2025",
    "gpa": "3.8",
    "internships": "2",
    "work_experience_years": "0",
    "high_cost_metro": "on",
    "skills": ["Python", "SQL"]
}"#;

#[test]
fn json_payload_matches_typed_profile() {
    let dataset = fixture_dataset();

    let from_json = estimator()
        .estimate_json(ENGINEER_PAYLOAD, &dataset)
        .expect("payload estimates");
    let from_profile = estimator()
        .estimate(&engineer(), &dataset)
        .expect("profile estimates");

    assert_eq!(from_json, from_profile);
}

#[test]
fn form_fields_match_json_payload() {
    let dataset = fixture_dataset();
    let raw = RawProfile::from_form_fields([
        ("major_group", "Engineering"),
        ("region", "West"),
        ("school_tier", "Tier1"),
        ("graduation_year", "2025"),
        ("gpa", "3.8"),
        ("internships", "2"),
        ("high_cost_metro", "on"),
        ("skills", "Python"),
        ("skills", "SQL"),
    ]);

    let from_form = estimator()
        .estimate_raw(&raw, &dataset)
        .expect("form estimates");
    let from_json = estimator()
        .estimate_json(ENGINEER_PAYLOAD, &dataset)
        .expect("payload estimates");

    assert_eq!(from_form, from_json);
}

#[test]
fn empty_object_is_a_valid_sparse_profile() {
    let result = estimator()
        .estimate_json("{}", &fixture_dataset())
        .expect("empty payload estimates");

    assert_eq!(result.confidence.score, 35);
}

#[test]
fn non_object_payloads_are_malformed() {
    for payload in ["[1, 2]", "\"Engineering\"", "42", "null"] {
        match estimator().estimate_json(payload, &fixture_dataset()) {
            Err(EstimationError::MalformedInput(message)) => {
                assert!(message.contains("JSON object"), "unexpected message: {message}")
            }
            other => panic!("expected malformed input for {payload}, got {other:?}"),
        }
    }
}

#[test]
fn unparsable_payloads_are_malformed() {
    for payload in ["{", "not json", "{\"gpa\": 3.5,}"] {
        let err = estimator()
            .estimate_json(payload, &fixture_dataset())
            .expect_err("payload rejected");
        assert!(matches!(err, EstimationError::MalformedInput(_)));
    }
}

#[test]
fn oddly_typed_fields_degrade_instead_of_failing() {
    let dataset = fixture_dataset();

    let result = estimator()
        .estimate_json(
            r#"{
                "major_group": 42,
                "region": "West",
                "gpa": [3.5],
                "internships": { "count": 2 },
                "skills": ["Python", 3]
            }"#,
            &dataset,
        )
        .expect("degraded payload still estimates");

    assert_eq!(result.inputs_used.major_group, UNKNOWN_BUCKET);
    assert_eq!(result.inputs_used.region, "West");
    assert_eq!(result.inputs_used.gpa, None);
    assert_eq!(result.inputs_used.internships, 0);
    let skills: Vec<&str> = result.inputs_used.skills.iter().map(String::as_str).collect();
    assert_eq!(skills, vec!["Python"]);
    assert!(result
        .confidence
        .reasons
        .iter()
        .any(|reason| reason.starts_with("GPA")));
}
