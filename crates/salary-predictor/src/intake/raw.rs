use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Scalar form value as it arrives from a browser or JSON caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Number(f64),
    Text(String),
    /// Arrays, objects, and anything else no reading can be taken from.
    Other(Value),
}

impl RawValue {
    /// Numeric reading of the value. Empty, non-finite, and unparsable values
    /// yield `None`; a trailing `+` (as in `"3+"`) is ignored.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Flag(_) | RawValue::Other(_) => return None,
            RawValue::Number(value) => *value,
            RawValue::Text(text) => {
                let trimmed = text.trim().trim_end_matches('+').trim_end();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };

        value.is_finite().then_some(value)
    }

    /// Checkbox-style reading: `true`, non-zero numbers, and `on`/`true`/`yes`/`y`/`1`.
    pub fn as_flag(&self) -> bool {
        match self {
            RawValue::Flag(flag) => *flag,
            RawValue::Number(value) => *value != 0.0,
            RawValue::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "on" | "true" | "yes" | "y" | "1"
            ),
            RawValue::Other(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

/// Skill selection: a list of names or one comma-separated string.
///
/// List entries that are not strings are kept on the wire but never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSkills {
    List(Vec<Value>),
    Delimited(String),
    Other(Value),
}

impl RawSkills {
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawSkills::List(
            names
                .into_iter()
                .map(|name| Value::String(name.into()))
                .collect(),
        )
    }

    pub fn names(&self) -> Vec<String> {
        let names: Vec<&str> = match self {
            RawSkills::List(entries) => entries
                .iter()
                .filter_map(|entry| {
                    let name = entry.as_str();
                    if name.is_none() {
                        debug!(entry = %entry, "ignoring non-text skill entry");
                    }
                    name
                })
                .collect(),
            RawSkills::Delimited(joined) => joined.split(',').collect(),
            RawSkills::Other(value) => {
                debug!(value = %value, "ignoring unreadable skills field");
                Vec::new()
            }
        };

        names
            .into_iter()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Category fields keep text only; any other JSON shape reads as absent.
fn text_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            debug!(value = %other, "ignoring non-text category value");
            None
        }
        None => None,
    })
}

/// Unvalidated profile payload. Every field may be absent or oddly typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default, deserialize_with = "text_or_absent")]
    pub major_group: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub school_tier: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<RawValue>,
    #[serde(default)]
    pub gpa: Option<RawValue>,
    #[serde(default)]
    pub internships: Option<RawValue>,
    #[serde(default)]
    pub work_experience_years: Option<RawValue>,
    #[serde(default)]
    pub high_cost_metro: Option<RawValue>,
    #[serde(default)]
    pub skills: Option<RawSkills>,
}


impl RawProfile {
    /// Builds a payload from submitted form pairs. Repeated `skills` keys
    /// accumulate the way checked checkboxes do; unknown keys are ignored.
    pub fn from_form_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut profile = Self::default();
        let mut skills = Vec::new();

        for (key, value) in fields {
            let value = value.into();
            match key.as_ref().trim() {
                "major_group" => profile.major_group = Some(value),
                "region" => profile.region = Some(value),
                "school_tier" => profile.school_tier = Some(value),
                "graduation_year" => profile.graduation_year = Some(RawValue::Text(value)),
                "gpa" => profile.gpa = Some(RawValue::Text(value)),
                "internships" => profile.internships = Some(RawValue::Text(value)),
                "work_experience_years" => {
                    profile.work_experience_years = Some(RawValue::Text(value))
                }
                "high_cost_metro" => profile.high_cost_metro = Some(RawValue::Text(value)),
                "skills" => skills.push(value),
                _ => {}
            }
        }

        if !skills.is_empty() {
            profile.skills = Some(RawSkills::list(skills));
        }

        profile
    }
}
