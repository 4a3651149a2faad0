//! User profile aggregate.

use serde::{Deserialize, Serialize};

use super::{Age, AgeBracket};
use crate::domain::foundation::ValidationError;

/// Name used when the user leaves the name field blank.
pub const DEFAULT_NAME: &str = "Explorer";

/// Longest display name kept after sanitizing.
pub const MAX_NAME_CHARS: usize = 40;

/// Raw profile form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub gender: String,
}

impl ProfileForm {
    pub fn new(name: impl Into<String>, age: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            gender: gender.into(),
        }
    }
}

/// A self-reported profile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord")]
pub struct Profile {
    name: String,
    age: Age,
    gender: String,
    bracket: AgeBracket,
}

impl Profile {
    /// Creates a profile from already-typed values.
    ///
    /// The bracket is always derived from `age`; the name is sanitized.
    pub fn new(name: &str, age: Age, gender: impl Into<String>) -> Self {
        Self {
            name: sanitize_name(name),
            age,
            gender: gender.into().trim().to_string(),
            bracket: AgeBracket::classify(age),
        }
    }

    /// Validates raw form input and builds a profile.
    pub fn from_form(form: &ProfileForm) -> Result<Self, ValidationError> {
        let age = Age::parse(&form.age)?;
        Ok(Self::new(&form.name, age, form.gender.as_str()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn bracket(&self) -> AgeBracket {
        self.bracket
    }
}

/// On-disk shape. The stored bracket is ignored and re-derived on load.
#[derive(Deserialize)]
struct ProfileRecord {
    name: String,
    age: u32,
    #[serde(default)]
    gender: String,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = ValidationError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let age = Age::new(record.age)?;
        Ok(Profile::new(&record.name, age, record.gender))
    }
}

/// Trims, drops control characters and caps the length of a display name.
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_CHARS)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
