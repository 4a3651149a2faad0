//! Conversation partners the simulator can play.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::profile::AgeBracket;

/// Who the simulated partner is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRole {
    Parent,
    Partner,
    Friend,
    Teacher,
    /// The user is an adult practicing answers to a child's questions.
    Child,
}

impl PartnerRole {
    /// Every role, in the order they are offered.
    pub fn all() -> &'static [PartnerRole] {
        &[
            PartnerRole::Parent,
            PartnerRole::Partner,
            PartnerRole::Friend,
            PartnerRole::Teacher,
            PartnerRole::Child,
        ]
    }

    /// Roles offered to a bracket. Only adults may practice with a child.
    pub fn available_for(bracket: AgeBracket) -> Vec<PartnerRole> {
        Self::all()
            .iter()
            .copied()
            .filter(|role| role.is_available_for(bracket))
            .collect()
    }

    pub fn is_available_for(&self, bracket: AgeBracket) -> bool {
        match self {
            PartnerRole::Child => bracket.is_adult(),
            _ => true,
        }
    }

    /// Lowercase role noun used inside prompts.
    pub fn noun(&self) -> &'static str {
        match self {
            PartnerRole::Parent => "parent",
            PartnerRole::Partner => "partner",
            PartnerRole::Friend => "friend",
            PartnerRole::Teacher => "teacher",
            PartnerRole::Child => "child",
        }
    }

    /// Button text for the partner picker.
    pub fn choice_label(&self) -> &'static str {
        match self {
            PartnerRole::Parent => "A Parent/Guardian",
            PartnerRole::Partner => "A Partner",
            PartnerRole::Friend => "A Friend",
            PartnerRole::Teacher => "A Teacher",
            PartnerRole::Child => "A Child (Practice Answering)",
        }
    }

    /// Question asked before the description is entered.
    pub fn description_prompt(&self) -> String {
        match self {
            PartnerRole::Child => "Describe the approximate age or developmental stage of the child you want to simulate talking to (e.g., 'curious 7-year-old', 'pre-teen asking about puberty', 'young child asking where babies come from'):".to_string(),
            role => format!(
                "Describe the {} you want to talk to (e.g., 'strict but usually fair', 'very understanding', 'a bit worried'):",
                role.noun()
            ),
        }
    }

    /// Description used when the user submits an empty one.
    pub fn default_description(&self) -> String {
        match self {
            PartnerRole::Child => "a curious child (around 6-8 years old)".to_string(),
            role => format!("a typical {}", role.noun()),
        }
    }

    /// Speaker label for the user's turns.
    pub fn user_label(&self) -> &'static str {
        match self {
            PartnerRole::Child => "You (Adult)",
            _ => "You",
        }
    }

    /// Speaker label for the simulated partner's turns.
    pub fn partner_label(&self, description: &str) -> String {
        match self {
            PartnerRole::Child => format!("Simulated Child (described as {})", description),
            role => format!("Simulated {}", role.noun()),
        }
    }
}

impl fmt::Display for PartnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}
