use super::raw::{RawProfile, RawValue};
use crate::estimation::{Profile, ReferenceDataset, UNKNOWN_BUCKET};
use std::collections::BTreeSet;
use tracing::debug;

const GPA_MIN: f64 = 0.0;
const GPA_MAX: f64 = 4.0;
const MAX_EXPERIENCE_YEARS: f64 = 50.0;

/// Builds a [`Profile`] from a raw payload. Never fails.
pub fn normalize(raw: &RawProfile, dataset: &ReferenceDataset) -> Profile {
    let profile = Profile {
        major_group: raw.major_group.clone().unwrap_or_default(),
        region: raw.region.clone().unwrap_or_default(),
        school_tier: raw.school_tier.clone().unwrap_or_default(),
        graduation_year: raw
            .graduation_year
            .as_ref()
            .and_then(RawValue::as_number)
            .and_then(whole_year),
        gpa: raw.gpa.as_ref().and_then(RawValue::as_number),
        internships: raw
            .internships
            .as_ref()
            .and_then(RawValue::as_number)
            .map(whole_count)
            .unwrap_or(0),
        work_experience_years: raw
            .work_experience_years
            .as_ref()
            .and_then(RawValue::as_number)
            .unwrap_or(0.0),
        high_cost_metro: raw
            .high_cost_metro
            .as_ref()
            .map(RawValue::as_flag)
            .unwrap_or(false),
        skills: raw
            .skills
            .as_ref()
            .map(|skills| skills.names())
            .unwrap_or_default()
            .into_iter()
            .collect(),
    };

    canonicalize(profile, dataset)
}

/// Re-applies every intake policy to an already-typed profile. Idempotent.
pub fn canonicalize(profile: Profile, dataset: &ReferenceDataset) -> Profile {
    let skills: BTreeSet<String> = profile
        .skills
        .iter()
        .filter_map(|skill| {
            let matched = match_key(skill, dataset.skills().keys().map(String::as_str));
            if matched.is_none() {
                debug!(skill = %skill, "dropping unrecognized skill");
            }
            matched
        })
        .collect();

    Profile {
        major_group: match_category(&profile.major_group, dataset.major_names()),
        region: match_category(
            &profile.region,
            dataset.regions().iter().map(|region| region.name.as_str()),
        ),
        school_tier: match_category(&profile.school_tier, dataset.school_tiers()),
        graduation_year: profile.graduation_year,
        gpa: profile
            .gpa
            .filter(|gpa| gpa.is_finite())
            .map(|gpa| gpa.clamp(GPA_MIN, GPA_MAX)),
        internships: profile.internships,
        work_experience_years: if profile.work_experience_years.is_finite() {
            profile
                .work_experience_years
                .clamp(0.0, MAX_EXPERIENCE_YEARS)
        } else {
            0.0
        },
        high_cost_metro: profile.high_cost_metro,
        skills,
    }
}

pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

fn match_category<'a>(value: &str, candidates: impl Iterator<Item = &'a str>) -> String {
    match_key(value, candidates).unwrap_or_else(|| UNKNOWN_BUCKET.to_string())
}

/// Exact match first, then a whitespace- and case-insensitive match.
fn match_key<'a>(value: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let wanted = normalize_key(trimmed);
    let mut folded = None;
    for candidate in candidates {
        if candidate == trimmed {
            return Some(candidate.to_string());
        }
        if folded.is_none() && normalize_key(candidate) == wanted {
            folded = Some(candidate.to_string());
        }
    }

    folded
}

fn whole_year(value: f64) -> Option<i32> {
    let year = value.trunc();
    if year >= i32::MIN as f64 && year <= i32::MAX as f64 {
        Some(year as i32)
    } else {
        None
    }
}

fn whole_count(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.floor().min(u32::MAX as f64) as u32
    }
}
