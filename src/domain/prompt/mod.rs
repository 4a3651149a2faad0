//! Prompt module - request construction.
//!
//! Each request is a system context (persona, bracket policy, optional JSON
//! instruction) paired with a task body and the sampling profile of its kind.

mod builder;
mod kind;
mod persona;
mod task;

pub use builder::PromptBuilder;
pub use kind::{RequestKind, SamplingProfile};
pub use persona::{
    bracket_policy, preamble, system_context, ASSISTANT_NAME, JSON_INSTRUCTION, PLATFORM_NAME,
};
pub use task::PromptTask;
