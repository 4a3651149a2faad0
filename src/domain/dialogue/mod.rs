//! Dialogue module - the conversation simulator's state.
//!
//! A session moves `Idle → AwaitingPartnerSelection → AwaitingDescription →
//! Active` and back to `Idle` on restart. Only the last few turns are ever
//! read back into prompts.

mod errors;
mod role;
mod session;
mod state;

pub use errors::DialogueError;
pub use role::PartnerRole;
pub use session::{DialogueSession, DialogueTurn, Speaker, PROMPT_WINDOW};
pub use state::DialogueState;
