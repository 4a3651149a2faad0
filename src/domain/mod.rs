//! Domain layer containing the prompt/response contract and its state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `profile` - Age classification, profile and the per-bracket feature table
//! - `prompt` - Persona text, request kinds and request construction
//! - `contract` - Cleaning, parsing and shape validation of model output
//! - `dialogue` - Conversation simulator session and turn window
//! - `chat` - Free-form chat transcript with placeholder correlation

pub mod chat;
pub mod contract;
pub mod dialogue;
pub mod foundation;
pub mod profile;
pub mod prompt;
