//! Conversation simulator: pick a partner, describe them, then talk.
//!
//! The session lock is taken only around state edits. While a request is in
//! flight the session is marked pending instead, and the reply (or its
//! failure) is applied under a fresh lock.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::handlers::exchange::exchange;
use crate::application::{Control, FeatureError, SessionContext};
use crate::domain::contract::DialogueLine;
use crate::domain::dialogue::{DialogueError, DialogueState, PartnerRole};
use crate::domain::profile::{Feature, Profile};
use crate::domain::prompt::{PromptBuilder, PromptTask};
use crate::ports::CompletionClient;

/// The partner's first line after the description is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueOpening {
    pub role: PartnerRole,
    pub description: String,
    pub line: String,
}

/// Handler for the conversation simulator screen.
pub struct DialogueHandler {
    client: Arc<dyn CompletionClient>,
    prompts: PromptBuilder,
}

impl DialogueHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
        }
    }

    /// Shows the partner picker. Returns the roles offered to this bracket.
    pub async fn begin(&self, ctx: &SessionContext) -> Result<Vec<PartnerRole>, FeatureError> {
        let profile = ctx.require_feature(Feature::Dialogue)?;
        ctx.dialogue().await.begin()?;
        Ok(PartnerRole::available_for(profile.bracket()))
    }

    /// Records the partner role. Returns the question to ask about them.
    pub async fn select_partner(
        &self,
        ctx: &SessionContext,
        role: PartnerRole,
    ) -> Result<String, FeatureError> {
        let profile = ctx.require_feature(Feature::Dialogue)?;
        ctx.dialogue().await.select_partner(role, profile.bracket())?;
        Ok(role.description_prompt())
    }

    /// Records the description (blank uses the role default) and requests
    /// the partner's opening line.
    ///
    /// If the opening request fails the session stays active without an
    /// opening line; [`retry_opening`](Self::retry_opening) asks again.
    pub async fn describe(
        &self,
        ctx: &SessionContext,
        description: &str,
    ) -> Result<DialogueOpening, FeatureError> {
        let profile = ctx.require_feature(Feature::Dialogue)?;
        let _permit = ctx.controls().acquire(Control::DialogueOpen)?;
        ctx.dialogue().await.submit_description(description)?;
        self.open(ctx, profile).await
    }

    /// Requests the opening line for an active session that has none.
    pub async fn retry_opening(&self, ctx: &SessionContext) -> Result<DialogueOpening, FeatureError> {
        let profile = ctx.require_feature(Feature::Dialogue)?;
        let _permit = ctx.controls().acquire(Control::DialogueOpen)?;
        self.open(ctx, profile).await
    }

    // Caller holds the DialogueOpen permit.
    async fn open(
        &self,
        ctx: &SessionContext,
        profile: &Profile,
    ) -> Result<DialogueOpening, FeatureError> {
        let (generation, role, description) = {
            let session = ctx.dialogue().await;
            if session.opening_line().is_some() {
                return Err(DialogueError::OpeningLineAlreadySet.into());
            }
            match (session.state(), session.role(), session.description()) {
                (DialogueState::Active, Some(role), Some(description)) => {
                    (session.generation(), role, description.to_string())
                }
                (state, _, _) => {
                    return Err(DialogueError::wrong_state(DialogueState::Active, state).into())
                }
            }
        };

        let request = self.prompts.build_for(
            profile,
            PromptTask::DialogueOpen {
                role,
                description: &description,
            },
        );
        let line: DialogueLine = exchange(self.client.as_ref(), request).await?;

        if let Err(err) = ctx
            .dialogue()
            .await
            .set_opening_line(generation, line.text.clone())
        {
            warn!(role = %role, error = %err, "Discarding opening line");
            return Err(err.into());
        }
        info!(role = %role, "Dialogue opened");
        Ok(DialogueOpening {
            role,
            description,
            line: line.text,
        })
    }

    /// Sends one user utterance and returns the partner's reply.
    ///
    /// The prompt carries the last six turns, ending with this utterance.
    /// On failure the user turn is rolled back so it can be resent.
    pub async fn send(&self, ctx: &SessionContext, utterance: &str) -> Result<String, FeatureError> {
        let profile = ctx.require_feature(Feature::Dialogue)?;
        let _permit = ctx.controls().acquire(Control::DialogueSend)?;

        let (generation, role, description, opening_line, history) = {
            let mut session = ctx.dialogue().await;
            session.begin_exchange(utterance)?;
            let generation = session.generation();
            let parts = match (session.role(), session.description(), session.opening_line()) {
                (Some(role), Some(description), Some(opening)) => {
                    Some((role, description.to_string(), opening.to_string()))
                }
                _ => None,
            };
            let Some((role, description, opening)) = parts else {
                let _ = session.abandon_exchange();
                return Err(DialogueError::OpeningLineMissing.into());
            };
            (generation, role, description, opening, session.render_window())
        };
        let utterance = utterance.trim();

        let request = self.prompts.build_for(
            profile,
            PromptTask::DialogueContinue {
                role,
                description: &description,
                opening_line: &opening_line,
                history: &history,
                utterance,
            },
        );
        let result: Result<DialogueLine, FeatureError> =
            exchange(self.client.as_ref(), request).await;

        let mut session = ctx.dialogue().await;
        if let Err(err) = session.require_generation(generation) {
            warn!(error = %err, "Discarding dialogue reply");
            return Err(result.err().unwrap_or_else(|| err.into()));
        }
        match result {
            Ok(line) => {
                session.complete_exchange(line.text.clone())?;
                Ok(line.text)
            }
            Err(err) => {
                let _ = session.abandon_exchange();
                Err(err)
            }
        }
    }

    /// Clears the conversation and returns to `Idle`.
    pub async fn restart(&self, ctx: &SessionContext) {
        ctx.dialogue().await.restart();
        info!("Dialogue restarted");
    }
}
