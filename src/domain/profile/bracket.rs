//! Age and age bracket value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Youngest age the platform accepts.
pub const MINIMUM_AGE: u32 = 5;

/// A self-reported age that has passed the minimum-age check.
///
/// Holding an `Age` is proof that the value is at least [`MINIMUM_AGE`],
/// which is what makes [`AgeBracket::classify`] total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Age(u32);

impl Age {
    /// Creates an age, rejecting anything below [`MINIMUM_AGE`].
    pub fn new(years: u32) -> Result<Self, ValidationError> {
        if years < MINIMUM_AGE {
            return Err(ValidationError::below_minimum(
                "age",
                i64::from(MINIMUM_AGE),
                i64::from(years),
            ));
        }
        Ok(Self(years))
    }

    /// Parses an age from raw form input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("age"));
        }
        let years: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::invalid_format("age", "must be a whole number"))?;
        if years < i64::from(MINIMUM_AGE) {
            return Err(ValidationError::below_minimum(
                "age",
                i64::from(MINIMUM_AGE),
                years,
            ));
        }
        let years = u32::try_from(years)
            .map_err(|_| ValidationError::invalid_format("age", "is not a plausible age"))?;
        Self::new(years)
    }

    /// Returns the age in years.
    pub fn years(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Age {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Age::new(value)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age-derived category gating feature availability and content depth.
///
/// Variants are declared youngest first, so the derived ordering follows
/// each bracket's lower age bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    /// 5 to 10.
    Kids,
    /// 11 to 17.
    Teens,
    /// 18 to 24.
    #[serde(rename = "Young Adults")]
    YoungAdults,
    /// 25 and over.
    Adults,
}

impl AgeBracket {
    /// Maps an accepted age to exactly one bracket.
    pub fn classify(age: Age) -> Self {
        match age.years() {
            0..=10 => AgeBracket::Kids,
            11..=17 => AgeBracket::Teens,
            18..=24 => AgeBracket::YoungAdults,
            _ => AgeBracket::Adults,
        }
    }

    /// Returns all brackets, youngest first.
    pub fn all() -> &'static [AgeBracket] {
        &[
            AgeBracket::Kids,
            AgeBracket::Teens,
            AgeBracket::YoungAdults,
            AgeBracket::Adults,
        ]
    }

    /// Lowest age that falls in this bracket.
    pub fn lower_bound(&self) -> u32 {
        match self {
            AgeBracket::Kids => MINIMUM_AGE,
            AgeBracket::Teens => 11,
            AgeBracket::YoungAdults => 18,
            AgeBracket::Adults => 25,
        }
    }

    /// Human-readable name used in prompts and on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            AgeBracket::Kids => "Kids",
            AgeBracket::Teens => "Teens",
            AgeBracket::YoungAdults => "Young Adults",
            AgeBracket::Adults => "Adults",
        }
    }

    /// Returns true for the two adult brackets.
    pub fn is_adult(&self) -> bool {
        matches!(self, AgeBracket::YoungAdults | AgeBracket::Adults)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
