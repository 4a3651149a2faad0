//! Dialogue simulator state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of a simulated conversation.
///
/// - `Idle`: nothing chosen yet
/// - `AwaitingPartnerSelection`: picker shown, waiting for a role
/// - `AwaitingDescription`: role chosen, waiting for a description
/// - `Active`: turns are being exchanged
///
/// Every non-idle state may restart back to `Idle`. There is no terminal
/// state; the session never expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Idle,
    AwaitingPartnerSelection,
    AwaitingDescription,
    Active,
}

impl DialogueState {
    /// Returns true if user utterances are accepted in this state.
    pub fn accepts_utterances(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            (Idle, AwaitingPartnerSelection)
                | (AwaitingPartnerSelection, AwaitingDescription)
                | (AwaitingDescription, Active)
                // Restart
                | (AwaitingPartnerSelection, Idle)
                | (AwaitingDescription, Idle)
                | (Active, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Idle => vec![AwaitingPartnerSelection],
            AwaitingPartnerSelection => vec![AwaitingDescription, Idle],
            AwaitingDescription => vec![Active, Idle],
            Active => vec![Idle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DialogueState; 4] = [
        DialogueState::Idle,
        DialogueState::AwaitingPartnerSelection,
        DialogueState::AwaitingDescription,
        DialogueState::Active,
    ];

    mod transitions {
        use super::*;

        #[test]
        fn forward_path_is_valid() {
            let s = DialogueState::Idle;
            let s = s.transition_to(DialogueState::AwaitingPartnerSelection).unwrap();
            let s = s.transition_to(DialogueState::AwaitingDescription).unwrap();
            let s = s.transition_to(DialogueState::Active).unwrap();
            assert_eq!(s, DialogueState::Active);
        }

        #[test]
        fn cannot_skip_description() {
            assert!(DialogueState::AwaitingPartnerSelection
                .transition_to(DialogueState::Active)
                .is_err());
        }

        #[test]
        fn idle_cannot_jump_to_active() {
            assert!(!DialogueState::Idle.can_transition_to(&DialogueState::Active));
        }

        #[test]
        fn every_non_idle_state_can_restart() {
            for state in ALL.iter().filter(|s| **s != DialogueState::Idle) {
                assert!(state.can_transition_to(&DialogueState::Idle), "{:?}", state);
            }
        }

        #[test]
        fn no_state_is_terminal() {
            for state in ALL {
                assert!(!state.is_terminal());
            }
        }

        #[test]
        fn valid_transitions_agree_with_can_transition_to() {
            for from in ALL {
                for to in ALL {
                    assert_eq!(
                        from.can_transition_to(&to),
                        from.valid_transitions().contains(&to),
                        "{:?} -> {:?}",
                        from,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(DialogueState::default(), DialogueState::Idle);
    }

    #[test]
    fn only_active_accepts_utterances() {
        for state in ALL {
            assert_eq!(state.accepts_utterances(), state == DialogueState::Active);
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&DialogueState::AwaitingDescription).unwrap();
        assert_eq!(json, "\"awaiting_description\"");
    }
}
