use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category label substituted for any major, region, or school tier the
/// reference dataset does not recognize.
pub const UNKNOWN_BUCKET: &str = "Other/Unknown";

/// Normalized, validated career profile consumed by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub major_group: String,
    pub region: String,
    pub school_tier: String,
    pub graduation_year: Option<i32>,
    /// Always within `[0.0, 4.0]` once canonicalized.
    pub gpa: Option<f64>,
    pub internships: u32,
    pub work_experience_years: f64,
    pub high_cost_metro: bool,
    pub skills: BTreeSet<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            major_group: UNKNOWN_BUCKET.to_string(),
            region: UNKNOWN_BUCKET.to_string(),
            school_tier: UNKNOWN_BUCKET.to_string(),
            graduation_year: None,
            gpa: None,
            internships: 0,
            work_experience_years: 0.0,
            high_cost_metro: false,
            skills: BTreeSet::new(),
        }
    }
}

/// Profile dimension a resolved factor was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    MajorBaseline,
    Region,
    SchoolTier,
    Gpa,
    Internships,
    HighCostMetro,
    Skills,
}

impl Dimension {
    /// Resolution order; driver ranking ties fall back to it.
    pub const fn ordered() -> [Self; 7] {
        [
            Self::MajorBaseline,
            Self::Region,
            Self::SchoolTier,
            Self::Gpa,
            Self::Internships,
            Self::HighCostMetro,
            Self::Skills,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MajorBaseline => "Major baseline",
            Self::Region => "Region adjustment",
            Self::SchoolTier => "School tier multiplier",
            Self::Gpa => "GPA bump",
            Self::Internships => "Internship bump",
            Self::HighCostMetro => "High-cost metro adjustment",
            Self::Skills => "Skills bonus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Starting salary the other factors act on.
    Baseline,
    Multiplicative,
    /// Currency amount added after all multipliers.
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    Dataset,
    Fallback,
    Profile,
    NotProvided,
}

impl FactorSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dataset => "reference dataset",
            Self::Fallback => "fallback bucket",
            Self::Profile => "profile input",
            Self::NotProvided => "not provided",
        }
    }
}

/// One named numeric adjustment derived from a single profile dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFactor {
    pub dimension: Dimension,
    pub kind: FactorKind,
    pub value: f64,
    pub source: FactorSource,
    /// Human-readable description of the matched input, e.g. `West`.
    pub detail: String,
}

impl ResolvedFactor {
    /// True when the factor leaves the estimate unchanged.
    pub fn is_neutral(&self) -> bool {
        match self.kind {
            FactorKind::Baseline => false,
            FactorKind::Multiplicative => self.value == 1.0,
            FactorKind::Additive => self.value == 0.0,
        }
    }
}

/// Ordered factor list shared by the engine and the explanation builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedFactors(Vec<ResolvedFactor>);

impl ResolvedFactors {
    pub fn new(factors: Vec<ResolvedFactor>) -> Self {
        Self(factors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedFactor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, dimension: Dimension) -> Option<&ResolvedFactor> {
        self.0.iter().find(|factor| factor.dimension == dimension)
    }

    pub fn is_fallback(&self, dimension: Dimension) -> bool {
        self.get(dimension)
            .map(|factor| factor.source == FactorSource::Fallback)
            .unwrap_or(false)
    }

    /// Starting salary before adjustments; zero when no baseline was resolved.
    pub fn baseline(&self) -> f64 {
        self.0
            .iter()
            .filter(|factor| factor.kind == FactorKind::Baseline)
            .map(|factor| factor.value)
            .sum()
    }

    pub fn multiplier_product(&self) -> f64 {
        self.0
            .iter()
            .filter(|factor| factor.kind == FactorKind::Multiplicative)
            .map(|factor| factor.value)
            .product()
    }

    pub fn additive_total(&self) -> f64 {
        self.0
            .iter()
            .filter(|factor| factor.kind == FactorKind::Additive)
            .map(|factor| factor.value)
            .sum()
    }
}

/// Low/mid/high salary range at one point in time, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

impl SalaryBand {
    pub fn is_ordered(&self) -> bool {
        self.low <= self.mid && self.mid <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confidence {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Complete response for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub starting: SalaryBand,
    pub year5: SalaryBand,
    pub year10: SalaryBand,
    pub confidence: Confidence,
    pub drivers: Vec<String>,
    pub tips: Vec<String>,
    pub inputs_used: Profile,
}
