//! Turn history for the conversation simulator.

use serde::{Deserialize, Serialize};

use super::{DialogueError, DialogueState, PartnerRole};
use crate::domain::foundation::StateMachine;
use crate::domain::profile::AgeBracket;

/// Number of most recent turns fed back into continuation prompts.
pub const PROMPT_WINDOW: usize = 6;

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Partner,
}

/// One utterance in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl DialogueTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn partner(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Partner,
            text: text.into(),
        }
    }

    /// Renders the turn as a `Label: text` line.
    pub fn render(&self, role: PartnerRole, description: &str) -> String {
        match self.speaker {
            Speaker::User => format!("{}: {}", role.user_label(), self.text),
            Speaker::Partner => format!("{}: {}", role.partner_label(description), self.text),
        }
    }
}

/// A simulated conversation.
///
/// The opening line is kept apart from `turns`, so after `N` completed
/// exchanges the log holds exactly `2N` turns. The full log is retained;
/// only [`window`](Self::window) is bounded.
///
/// `generation` changes on every restart. A reply requested under one
/// generation is refused once the session has moved on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSession {
    state: DialogueState,
    role: Option<PartnerRole>,
    description: Option<String>,
    opening_line: Option<String>,
    turns: Vec<DialogueTurn>,
    pending: bool,
    #[serde(default)]
    generation: u64,
}

impl DialogueSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the partner picker.
    pub fn begin(&mut self) -> Result<(), DialogueError> {
        self.state = self
            .state
            .transition_to(DialogueState::AwaitingPartnerSelection)?;
        Ok(())
    }

    /// Records the chosen partner role.
    pub fn select_partner(
        &mut self,
        role: PartnerRole,
        bracket: AgeBracket,
    ) -> Result<(), DialogueError> {
        if !role.is_available_for(bracket) {
            return Err(DialogueError::RoleUnavailable { role, bracket });
        }
        self.state = self.state.transition_to(DialogueState::AwaitingDescription)?;
        self.role = Some(role);
        Ok(())
    }

    /// Records the partner description and activates the session.
    ///
    /// Blank input is replaced by the role's default description. Returns
    /// the description that was stored.
    pub fn submit_description(&mut self, raw: &str) -> Result<&str, DialogueError> {
        let role = self
            .role
            .ok_or_else(|| DialogueError::wrong_state(DialogueState::AwaitingDescription, self.state))?;
        self.state = self.state.transition_to(DialogueState::Active)?;
        let trimmed = raw.trim();
        let description = if trimmed.is_empty() {
            role.default_description()
        } else {
            trimmed.to_string()
        };
        Ok(self.description.insert(description).as_str())
    }

    /// Stores the partner's opening line requested under `generation`.
    pub fn set_opening_line(
        &mut self,
        generation: u64,
        line: impl Into<String>,
    ) -> Result<(), DialogueError> {
        self.require_generation(generation)?;
        self.require_active()?;
        if self.opening_line.is_some() {
            return Err(DialogueError::OpeningLineAlreadySet);
        }
        self.opening_line = Some(line.into());
        Ok(())
    }

    /// Appends the user's turn and marks a partner reply as pending.
    pub fn begin_exchange(&mut self, utterance: &str) -> Result<(), DialogueError> {
        self.require_active()?;
        if self.opening_line.is_none() {
            return Err(DialogueError::OpeningLineMissing);
        }
        if self.pending {
            return Err(DialogueError::ExchangePending);
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(DialogueError::EmptyUtterance);
        }
        self.turns.push(DialogueTurn::user(utterance));
        self.pending = true;
        Ok(())
    }

    /// Appends the partner's reply, completing the pending exchange.
    pub fn complete_exchange(&mut self, line: impl Into<String>) -> Result<(), DialogueError> {
        if !self.pending {
            return Err(DialogueError::NoPendingExchange);
        }
        self.turns.push(DialogueTurn::partner(line));
        self.pending = false;
        Ok(())
    }

    /// Drops the pending user turn after a failed reply.
    ///
    /// Returns the utterance so the caller can offer it for resending.
    pub fn abandon_exchange(&mut self) -> Result<String, DialogueError> {
        if !self.pending {
            return Err(DialogueError::NoPendingExchange);
        }
        self.pending = false;
        match self.turns.pop() {
            Some(turn) if turn.speaker == Speaker::User => Ok(turn.text),
            Some(turn) => {
                self.turns.push(turn);
                Err(DialogueError::NoPendingExchange)
            }
            None => Err(DialogueError::NoPendingExchange),
        }
    }

    /// Clears everything, returns to `Idle` and starts a new generation.
    pub fn restart(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// The most recent turns, oldest first, bounded by [`PROMPT_WINDOW`].
    pub fn window(&self) -> &[DialogueTurn] {
        let start = self.turns.len().saturating_sub(PROMPT_WINDOW);
        &self.turns[start..]
    }

    /// Renders [`window`](Self::window) as newline-separated `Label: text` lines.
    pub fn render_window(&self) -> String {
        let (Some(role), Some(description)) = (self.role, self.description.as_deref()) else {
            return String::new();
        };
        self.window()
            .iter()
            .map(|turn| turn.render(role, description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn role(&self) -> Option<PartnerRole> {
        self.role
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn opening_line(&self) -> Option<&str> {
        self.opening_line.as_deref()
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fails if the session was restarted since `generation` was read.
    pub fn require_generation(&self, generation: u64) -> Result<(), DialogueError> {
        if self.generation == generation {
            Ok(())
        } else {
            Err(DialogueError::StaleReply {
                requested: generation,
                current: self.generation,
            })
        }
    }

    fn require_active(&self) -> Result<(), DialogueError> {
        if self.state.accepts_utterances() {
            Ok(())
        } else {
            Err(DialogueError::wrong_state(DialogueState::Active, self.state))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_session(role: PartnerRole, bracket: AgeBracket) -> DialogueSession {
        let mut session = DialogueSession::new();
        session.begin().unwrap();
        session.select_partner(role, bracket).unwrap();
        session.submit_description("").unwrap();
        let generation = session.generation();
        session.set_opening_line(generation, "Hello beta").unwrap();
        session
    }

    fn exchange(session: &mut DialogueSession, n: usize) {
        session.begin_exchange(&format!("user {}", n)).unwrap();
        session.complete_exchange(format!("partner {}", n)).unwrap();
    }

    mod setup {
        use super::*;

        #[test]
        fn new_session_is_idle_and_empty() {
            let session = DialogueSession::new();
            assert_eq!(session.state(), DialogueState::Idle);
            assert!(session.role().is_none());
            assert!(session.turns().is_empty());
        }

        #[test]
        fn select_partner_requires_picker() {
            let mut session = DialogueSession::new();
            let err = session
                .select_partner(PartnerRole::Friend, AgeBracket::Teens)
                .unwrap_err();
            assert!(matches!(err, DialogueError::InvalidState(_)));
        }

        #[test]
        fn child_role_rejected_for_teens() {
            let mut session = DialogueSession::new();
            session.begin().unwrap();
            let err = session
                .select_partner(PartnerRole::Child, AgeBracket::Teens)
                .unwrap_err();
            assert_eq!(
                err,
                DialogueError::RoleUnavailable {
                    role: PartnerRole::Child,
                    bracket: AgeBracket::Teens
                }
            );
            assert_eq!(session.state(), DialogueState::AwaitingPartnerSelection);
        }

        #[test]
        fn blank_description_uses_role_default() {
            let mut session = DialogueSession::new();
            session.begin().unwrap();
            session
                .select_partner(PartnerRole::Parent, AgeBracket::Teens)
                .unwrap();
            let description = session.submit_description("   ").unwrap().to_string();
            assert_eq!(description, "a typical parent");
            assert_eq!(session.state(), DialogueState::Active);
        }

        #[test]
        fn description_is_trimmed() {
            let mut session = DialogueSession::new();
            session.begin().unwrap();
            session
                .select_partner(PartnerRole::Friend, AgeBracket::Adults)
                .unwrap();
            session.submit_description("  very supportive ").unwrap();
            assert_eq!(session.description(), Some("very supportive"));
        }

        #[test]
        fn opening_line_set_once() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            let generation = session.generation();
            assert_eq!(
                session.set_opening_line(generation, "again"),
                Err(DialogueError::OpeningLineAlreadySet)
            );
        }

        #[test]
        fn opening_line_from_before_restart_is_refused() {
            let mut session = DialogueSession::new();
            let requested = session.generation();
            session.restart();
            session.begin().unwrap();
            session
                .select_partner(PartnerRole::Friend, AgeBracket::Teens)
                .unwrap();
            session.submit_description("kind").unwrap();

            assert_eq!(
                session.set_opening_line(requested, "stale"),
                Err(DialogueError::StaleReply {
                    requested,
                    current: requested + 1,
                })
            );
            assert!(session.opening_line().is_none());
        }
    }

    mod exchanges {
        use super::*;

        #[test]
        fn n_exchanges_give_2n_turns() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            for n in 0..5 {
                exchange(&mut session, n);
                assert_eq!(session.turns().len(), 2 * (n + 1));
            }
        }

        #[test]
        fn cannot_exchange_before_opening() {
            let mut session = DialogueSession::new();
            session.begin().unwrap();
            session
                .select_partner(PartnerRole::Friend, AgeBracket::Teens)
                .unwrap();
            session.submit_description("").unwrap();
            assert_eq!(
                session.begin_exchange("hi"),
                Err(DialogueError::OpeningLineMissing)
            );
        }

        #[test]
        fn second_utterance_while_pending_is_rejected() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            session.begin_exchange("first").unwrap();
            assert_eq!(
                session.begin_exchange("second"),
                Err(DialogueError::ExchangePending)
            );
            assert_eq!(session.turns().len(), 1);
        }

        #[test]
        fn empty_utterance_is_rejected() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            assert_eq!(session.begin_exchange("  "), Err(DialogueError::EmptyUtterance));
        }

        #[test]
        fn abandon_rolls_back_user_turn() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            exchange(&mut session, 0);
            session.begin_exchange("lost").unwrap();
            assert_eq!(session.abandon_exchange().unwrap(), "lost");
            assert_eq!(session.turns().len(), 2);
            assert!(!session.is_pending());
        }

        #[test]
        fn complete_without_pending_fails() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            assert_eq!(
                session.complete_exchange("stray"),
                Err(DialogueError::NoPendingExchange)
            );
        }
    }

    mod window {
        use super::*;

        #[test]
        fn window_is_bounded_and_ordered() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            for n in 0..5 {
                exchange(&mut session, n);
            }
            let window = session.window();
            assert_eq!(window.len(), PROMPT_WINDOW);
            assert_eq!(window, &session.turns()[4..]);
            assert_eq!(window[0].text, "user 2");
            assert_eq!(window[5].text, "partner 4");
        }

        #[test]
        fn short_history_is_returned_whole() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            exchange(&mut session, 0);
            assert_eq!(session.window().len(), 2);
        }

        #[test]
        fn render_window_uses_role_labels() {
            let mut session = active_session(PartnerRole::Friend, AgeBracket::Teens);
            exchange(&mut session, 0);
            assert_eq!(
                session.render_window(),
                "You: user 0\nSimulated friend: partner 0"
            );
        }

        #[test]
        fn render_window_for_child_role() {
            let mut session = active_session(PartnerRole::Child, AgeBracket::Adults);
            exchange(&mut session, 0);
            assert_eq!(
                session.render_window(),
                "You (Adult): user 0\nSimulated Child (described as a curious child (around 6-8 years old)): partner 0"
            );
        }
    }

    mod restart {
        use super::*;

        #[test]
        fn restart_clears_everything() {
            let mut session = active_session(PartnerRole::Teacher, AgeBracket::Adults);
            exchange(&mut session, 0);
            let before = session.generation();
            session.restart();
            assert_eq!(session.state(), DialogueState::Idle);
            assert!(session.turns().is_empty());
            assert!(!session.is_pending());
            assert_eq!(session.generation(), before + 1);
            assert!(session.role().is_none());
            assert!(session.description().is_none());
            assert!(session.opening_line().is_none());
        }

        #[test]
        fn restart_during_pending_discards_late_reply() {
            let mut session = active_session(PartnerRole::Teacher, AgeBracket::Adults);
            session.begin_exchange("hello").unwrap();
            session.restart();
            assert_eq!(
                session.complete_exchange("late"),
                Err(DialogueError::NoPendingExchange)
            );
        }
    }
}
