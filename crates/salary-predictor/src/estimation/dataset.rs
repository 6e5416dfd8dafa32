use super::domain::UNKNOWN_BUCKET;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

const STANDARD_DATASET: &str = include_str!("../../data/salary_data.json");

/// Failure to load or validate a reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read reference dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference dataset is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reference dataset is malformed: {0}")]
    Malformed(String),
}

/// Entry-level pay and growth expectations for one major group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MajorBaseline {
    pub starting_base: f64,
    /// Fractional growth after five years (`0.45` means +45%).
    pub growth_5y_pct: f64,
    pub growth_10y_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAdjustment {
    pub name: String,
    pub adjustment: f64,
}

/// Static lookup tables driving every estimate. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceDataset {
    major_groups: BTreeMap<String, MajorBaseline>,
    regions: Vec<RegionAdjustment>,
    school_tier_multipliers: BTreeMap<String, f64>,
    skills: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    high_cost_metro_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_skills_boost: Option<f64>,
    major_skill_focus: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    fallback_major: MajorBaseline,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegionEntry {
    Named(String),
    Adjusted {
        name: String,
        #[serde(default = "neutral_adjustment")]
        adjustment: f64,
    },
}

fn neutral_adjustment() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    major_groups: BTreeMap<String, MajorBaseline>,
    regions: Vec<RegionEntry>,
    school_tier_multipliers: BTreeMap<String, f64>,
    skills: BTreeMap<String, f64>,
    #[serde(default)]
    region_col_multipliers: BTreeMap<String, f64>,
    #[serde(default)]
    high_cost_metro_multiplier: Option<f64>,
    #[serde(default)]
    max_skills_boost: Option<f64>,
    #[serde(default)]
    major_skill_focus: BTreeMap<String, Vec<String>>,
}

impl ReferenceDataset {
    /// The dataset bundled with the crate.
    pub fn standard() -> Result<Self, DatasetError> {
        Self::from_json_str(STANDARD_DATASET)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let document: DatasetDocument = serde_json::from_reader(reader)?;
        Self::validate(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let document: DatasetDocument = serde_json::from_str(raw)?;
        Self::validate(document)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DatasetError> {
        let document: DatasetDocument = serde_json::from_value(value)?;
        Self::validate(document)
    }

    fn validate(document: DatasetDocument) -> Result<Self, DatasetError> {
        let DatasetDocument {
            major_groups,
            regions,
            school_tier_multipliers,
            skills,
            region_col_multipliers,
            high_cost_metro_multiplier,
            max_skills_boost,
            major_skill_focus,
        } = document;

        if major_groups.is_empty() {
            return Err(malformed("major_groups must contain at least one entry"));
        }
        for (name, baseline) in &major_groups {
            ensure_non_negative(&format!("major_groups.{name}.starting_base"), baseline.starting_base)?;
            ensure_growth(&format!("major_groups.{name}.growth_5y_pct"), baseline.growth_5y_pct)?;
            ensure_growth(&format!("major_groups.{name}.growth_10y_pct"), baseline.growth_10y_pct)?;
        }

        if regions.is_empty() {
            return Err(malformed("regions must contain at least one entry"));
        }
        let mut seen = BTreeSet::new();
        let mut resolved_regions = Vec::with_capacity(regions.len());
        for entry in regions {
            let (name, adjustment) = match entry {
                RegionEntry::Named(name) => (name, neutral_adjustment()),
                RegionEntry::Adjusted { name, adjustment } => (name, adjustment),
            };
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(malformed("region names must not be empty"));
            }
            if !seen.insert(name.clone()) {
                return Err(malformed(format!("region '{name}' is listed more than once")));
            }
            let adjustment = region_col_multipliers
                .get(&name)
                .copied()
                .unwrap_or(adjustment);
            ensure_non_negative(&format!("regions.{name}"), adjustment)?;
            resolved_regions.push(RegionAdjustment { name, adjustment });
        }

        if school_tier_multipliers.is_empty() {
            return Err(malformed("school_tier_multipliers must contain at least one entry"));
        }
        for (tier, multiplier) in &school_tier_multipliers {
            ensure_non_negative(&format!("school_tier_multipliers.{tier}"), *multiplier)?;
        }

        for (skill, weight) in &skills {
            ensure_non_negative(&format!("skills.{skill}"), *weight)?;
        }

        if let Some(multiplier) = high_cost_metro_multiplier {
            ensure_non_negative("high_cost_metro_multiplier", multiplier)?;
        }
        if let Some(boost) = max_skills_boost {
            ensure_non_negative("max_skills_boost", boost)?;
        }

        let fallback_major = match major_groups.get(UNKNOWN_BUCKET) {
            Some(baseline) => *baseline,
            None => mean_baseline(&major_groups),
        };

        Ok(Self {
            major_groups,
            regions: resolved_regions,
            school_tier_multipliers,
            skills,
            high_cost_metro_multiplier,
            max_skills_boost,
            major_skill_focus,
            fallback_major,
        })
    }

    pub fn major(&self, name: &str) -> Option<&MajorBaseline> {
        self.major_groups.get(name)
    }

    /// Baseline used for the unknown major bucket: the dataset's own
    /// `Other/Unknown` entry, or the mean of every major otherwise.
    pub fn fallback_major(&self) -> &MajorBaseline {
        &self.fallback_major
    }

    pub fn major_names(&self) -> impl Iterator<Item = &str> {
        self.major_groups.keys().map(String::as_str)
    }

    /// Regions in declared order.
    pub fn regions(&self) -> &[RegionAdjustment] {
        &self.regions
    }

    pub fn region_adjustment(&self, name: &str) -> Option<f64> {
        self.regions
            .iter()
            .find(|region| region.name == name)
            .map(|region| region.adjustment)
    }

    pub fn school_tier_multiplier(&self, tier: &str) -> Option<f64> {
        self.school_tier_multipliers.get(tier).copied()
    }

    pub fn school_tiers(&self) -> impl Iterator<Item = &str> {
        self.school_tier_multipliers.keys().map(String::as_str)
    }

    pub fn skill_weight(&self, skill: &str) -> Option<f64> {
        self.skills.get(skill).copied()
    }

    pub fn skills(&self) -> &BTreeMap<String, f64> {
        &self.skills
    }

    pub fn high_cost_metro_multiplier(&self) -> Option<f64> {
        self.high_cost_metro_multiplier
    }

    pub fn max_skills_boost(&self) -> Option<f64> {
        self.max_skills_boost
    }

    /// Recommended skills for a major, falling back to the unknown bucket's list.
    pub fn skill_focus(&self, major: &str) -> &[String] {
        self.major_skill_focus
            .get(major)
            .or_else(|| self.major_skill_focus.get(UNKNOWN_BUCKET))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn malformed(reason: impl Into<String>) -> DatasetError {
    DatasetError::Malformed(reason.into())
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(malformed(format!("{field} must be a finite, non-negative number (found {value})")))
    }
}

fn ensure_growth(field: &str, value: f64) -> Result<(), DatasetError> {
    if value.is_finite() && value >= -1.0 {
        Ok(())
    } else {
        Err(malformed(format!("{field} must be a finite fraction of at least -1.0 (found {value})")))
    }
}

fn mean_baseline(major_groups: &BTreeMap<String, MajorBaseline>) -> MajorBaseline {
    let count = major_groups.len() as f64;
    let (starting, growth_5y, growth_10y) = major_groups.values().fold(
        (0.0, 0.0, 0.0),
        |(starting, growth_5y, growth_10y), baseline| {
            (
                starting + baseline.starting_base,
                growth_5y + baseline.growth_5y_pct,
                growth_10y + baseline.growth_10y_pct,
            )
        },
    );

    MajorBaseline {
        starting_base: starting / count,
        growth_5y_pct: growth_5y / count,
        growth_10y_pct: growth_10y / count,
    }
}
