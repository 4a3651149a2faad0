//! Profile module - who the user is and what they may use.
//!
//! Age is validated at the input boundary, classified into exactly one
//! bracket, and the bracket selects both the feature set and the depth of
//! generated content.

mod bracket;
mod feature;
#[allow(clippy::module_inception)]
mod profile;

pub use bracket::{Age, AgeBracket, MINIMUM_AGE};
pub use feature::{available_features, Feature, FeatureDescriptor};
pub use profile::{sanitize_name, Profile, ProfileForm, DEFAULT_NAME, MAX_NAME_CHARS};
