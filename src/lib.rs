//! Beyond Whispers - Age-aware learning companion
//!
//! This crate implements the prompt/response contract behind the Beyond
//! Whispers features: age-bracket classification and feature gating, prompt
//! construction per bracket, a strict JSON contract enforced on model output,
//! and the turn-taking state of the conversation simulator.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
