//! Chat module - the free-form chat log.

mod transcript;

pub use transcript::{Author, ChatEntry, PendingReply, Transcript, THINKING_PLACEHOLDER};

use crate::domain::prompt::ASSISTANT_NAME;
use crate::domain::profile::Profile;

/// Greeting shown when the chat opens.
pub fn greeting(profile: &Profile) -> String {
    format!(
        "Namaste {}! I'm {}, your friendly helper. How can I assist you today? I'll provide information suitable for the {} age group, keeping Indian contexts in mind.",
        profile.name(),
        ASSISTANT_NAME,
        profile.bracket()
    )
}

/// Reply shown in place of an answer when the request failed.
pub fn apology(profile: &Profile, cause: &str) -> String {
    format!(
        "I'm sorry, {}, I encountered an issue: {} Could you please try rephrasing or asking again in a moment?",
        profile.name(),
        cause
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Age;

    #[test]
    fn greeting_names_user_and_bracket() {
        let profile = Profile::new("Meera", Age::new(15).unwrap(), "female");
        let text = greeting(&profile);
        assert!(text.starts_with("Namaste Meera! I'm Sahayak"));
        assert!(text.contains("Teens age group"));
    }

    #[test]
    fn apology_carries_cause() {
        let profile = Profile::new("Meera", Age::new(15).unwrap(), "female");
        let text = apology(&profile, "The assistant is busy right now.");
        assert!(text.contains("Meera"));
        assert!(text.contains("busy right now"));
    }
}
