//! Dialogue simulator errors.

use thiserror::Error;

use super::{DialogueState, PartnerRole};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::AgeBracket;

/// Errors raised by `DialogueSession` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// The requested step is not valid from the current state.
    #[error("{0}")]
    InvalidState(#[from] ValidationError),

    #[error("operation requires state {expected:?}, session is {actual:?}")]
    WrongState {
        expected: DialogueState,
        actual: DialogueState,
    },

    #[error("the {role} role is not offered to {bracket}")]
    RoleUnavailable {
        role: PartnerRole,
        bracket: AgeBracket,
    },

    #[error("the conversation has not opened yet")]
    OpeningLineMissing,

    #[error("the conversation has already opened")]
    OpeningLineAlreadySet,

    #[error("a reply is still pending")]
    ExchangePending,

    #[error("no reply is pending")]
    NoPendingExchange,

    #[error("reply belongs to an earlier conversation (generation {requested}, now {current})")]
    StaleReply { requested: u64, current: u64 },

    #[error("message cannot be empty")]
    EmptyUtterance,
}

impl DialogueError {
    pub fn wrong_state(expected: DialogueState, actual: DialogueState) -> Self {
        Self::WrongState { expected, actual }
    }
}
