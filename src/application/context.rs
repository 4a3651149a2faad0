//! Per-user session state passed to every handler.
//!
//! Created when a profile is submitted (or resumed), mutated by feature
//! interactions, and discarded on start-over. Locks guard short,
//! synchronous edits only; no lock is held while a request is in flight.

use tokio::sync::{Mutex, MutexGuard};

use super::{ControlGuard, FeatureError};
use crate::domain::chat::Transcript;
use crate::domain::contract::Scenario;
use crate::domain::dialogue::DialogueSession;
use crate::domain::profile::{Feature, Profile};

#[derive(Debug, Default)]
pub struct SessionContext {
    profile: Option<Profile>,
    controls: ControlGuard,
    scenario: Mutex<Option<Scenario>>,
    dialogue: Mutex<DialogueSession>,
    transcript: Mutex<Transcript>,
}

impl SessionContext {
    /// A context with no profile. Every feature fails with `ProfileRequired`.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn require_profile(&self) -> Result<&Profile, FeatureError> {
        self.profile.as_ref().ok_or(FeatureError::ProfileRequired)
    }

    /// Returns the profile if `feature` is offered to its bracket.
    pub fn require_feature(&self, feature: Feature) -> Result<&Profile, FeatureError> {
        let profile = self.require_profile()?;
        if !feature.is_available_for(profile.bracket()) {
            return Err(FeatureError::FeatureUnavailable {
                feature,
                bracket: profile.bracket(),
            });
        }
        Ok(profile)
    }

    pub fn controls(&self) -> &ControlGuard {
        &self.controls
    }

    /// The scenario currently on screen, if any.
    pub async fn current_scenario(&self) -> Option<Scenario> {
        self.scenario.lock().await.clone()
    }

    pub(crate) async fn replace_scenario(&self, scenario: Option<Scenario>) {
        *self.scenario.lock().await = scenario;
    }

    pub async fn dialogue(&self) -> MutexGuard<'_, DialogueSession> {
        self.dialogue.lock().await
    }

    pub async fn transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().await
    }
}
