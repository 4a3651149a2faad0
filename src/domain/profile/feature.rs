//! Feature catalogue and the bracket → available-features table.

use serde::Serialize;
use std::fmt;

use super::AgeBracket;

/// A user-facing feature of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Chat,
    Roleplay,
    Dialogue,
    Stories,
    Topics,
}

impl Feature {
    /// Stable identifier handed to the rendering surface.
    pub fn id(&self) -> &'static str {
        match self {
            Feature::Chat => "chatbot",
            Feature::Roleplay => "roleplay",
            Feature::Dialogue => "talksim",
            Feature::Stories => "stories",
            Feature::Topics => "learn",
        }
    }

    /// View the rendering surface should open for this feature.
    pub fn target_view(&self) -> &'static str {
        match self {
            Feature::Chat => "chatbot.html",
            Feature::Roleplay => "roleplay.html",
            Feature::Dialogue => "talksim.html",
            Feature::Stories => "stories.html",
            Feature::Topics => "learn.html",
        }
    }

    /// Returns true if this feature is offered to the given bracket.
    pub fn is_available_for(&self, bracket: AgeBracket) -> bool {
        available_features(bracket)
            .iter()
            .any(|descriptor| descriptor.feature == *self)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Feature metadata for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureDescriptor {
    pub feature: Feature,
    pub name: &'static str,
    pub description: &'static str,
}

impl FeatureDescriptor {
    const fn new(feature: Feature, name: &'static str, description: &'static str) -> Self {
        Self {
            feature,
            name,
            description,
        }
    }

    pub fn id(&self) -> &'static str {
        self.feature.id()
    }

    pub fn target_view(&self) -> &'static str {
        self.feature.target_view()
    }
}

static KIDS_FEATURES: [FeatureDescriptor; 3] = [
    FeatureDescriptor::new(
        Feature::Chat,
        "Chat with Bot",
        "Ask basic questions about your body and feelings.",
    ),
    FeatureDescriptor::new(
        Feature::Stories,
        "Interactive Stories",
        "Read fun stories about friendship and safety.",
    ),
    FeatureDescriptor::new(
        Feature::Topics,
        "Learn about Growing Up",
        "Discover simple facts about your body.",
    ),
];

static TEEN_FEATURES: [FeatureDescriptor; 5] = [
    FeatureDescriptor::new(
        Feature::Chat,
        "Chat with Bot",
        "Ask about puberty, relationships, and more.",
    ),
    FeatureDescriptor::new(
        Feature::Roleplay,
        "Roleplay Scenarios",
        "Practice handling tricky situations with friends or online.",
    ),
    FeatureDescriptor::new(
        Feature::Dialogue,
        "Talk Simulator",
        "Practice important conversations (e.g., with parents, friends).",
    ),
    FeatureDescriptor::new(
        Feature::Stories,
        "Interactive Stories",
        "Explore stories about decisions and feelings.",
    ),
    FeatureDescriptor::new(
        Feature::Topics,
        "Learn In-Depth",
        "Get info on puberty, consent, and healthy habits.",
    ),
];

// Young adults and adults share one feature set; depth differs only in the prompt.
static ADULT_FEATURES: [FeatureDescriptor; 5] = [
    FeatureDescriptor::new(
        Feature::Chat,
        "Chat with Bot",
        "Discuss sexual health, relationships, and consent.",
    ),
    FeatureDescriptor::new(
        Feature::Roleplay,
        "Roleplay Scenarios",
        "Navigate complex social and relationship dynamics.",
    ),
    FeatureDescriptor::new(
        Feature::Dialogue,
        "Talk Simulator",
        "Practice conversations on consent, STIs, and boundaries.",
    ),
    FeatureDescriptor::new(
        Feature::Stories,
        "Interactive Stories",
        "Reflect on mature themes in relationships and life.",
    ),
    FeatureDescriptor::new(
        Feature::Topics,
        "Comprehensive Learning",
        "Access detailed info on sexual health and well-being.",
    ),
];

/// Returns the features offered to a bracket, in dashboard order.
pub fn available_features(bracket: AgeBracket) -> &'static [FeatureDescriptor] {
    match bracket {
        AgeBracket::Kids => &KIDS_FEATURES,
        AgeBracket::Teens => &TEEN_FEATURES,
        AgeBracket::YoungAdults | AgeBracket::Adults => &ADULT_FEATURES,
    }
}
