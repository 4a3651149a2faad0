//! Roleplay scenarios: generate a situation, pick a choice, get feedback.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::handlers::exchange::exchange;
use crate::application::{Control, FeatureError, SessionContext};
use crate::domain::contract::{Feedback, Scenario};
use crate::domain::foundation::ValidationError;
use crate::domain::profile::Feature;
use crate::domain::prompt::{PromptBuilder, PromptTask};
use crate::ports::CompletionClient;

/// Outcome of choosing an option in the current scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceFeedback {
    pub chosen_index: usize,
    pub ideal_index: usize,
    pub was_ideal: bool,
    pub feedback: String,
}

/// Handler for the roleplay screen.
pub struct RoleplayHandler {
    client: Arc<dyn CompletionClient>,
    prompts: PromptBuilder,
}

impl RoleplayHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
        }
    }

    /// Requests a new scenario and makes it current.
    ///
    /// The previous scenario is dropped first, so after a failure there is
    /// no scenario to answer.
    pub async fn generate(&self, ctx: &SessionContext) -> Result<Scenario, FeatureError> {
        let profile = ctx.require_feature(Feature::Roleplay)?;
        let _permit = ctx.controls().acquire(Control::ScenarioGenerate)?;
        ctx.replace_scenario(None).await;

        let request = self.prompts.build_for(profile, PromptTask::ScenarioGenerate);
        let scenario: Scenario = exchange(self.client.as_ref(), request).await?;

        info!(choices = scenario.choices.len(), "Scenario generated");
        ctx.replace_scenario(Some(scenario.clone())).await;
        Ok(scenario)
    }

    /// "Try another scenario": the same sequence with a fresh request.
    pub async fn another(&self, ctx: &SessionContext) -> Result<Scenario, FeatureError> {
        self.generate(ctx).await
    }

    /// Answers the current scenario with choice `index` (0-based).
    pub async fn choose(
        &self,
        ctx: &SessionContext,
        index: usize,
    ) -> Result<ChoiceFeedback, FeatureError> {
        let profile = ctx.require_feature(Feature::Roleplay)?;
        let scenario = ctx
            .current_scenario()
            .await
            .ok_or(FeatureError::ScenarioMissing)?;
        let chosen = scenario.choice(index).ok_or_else(|| {
            ValidationError::out_of_range(
                "choice",
                0,
                scenario.choices.len() as i64 - 1,
                index as i64,
            )
        })?;
        let ideal = scenario.ideal_choice().ok_or_else(|| {
            ValidationError::invalid_format("idealChoiceIndex", "does not index into choices")
        })?;
        let _permit = ctx.controls().acquire(Control::ScenarioChoice)?;

        let request = self.prompts.build_for(
            profile,
            PromptTask::ScenarioFeedback {
                scenario: &scenario.text,
                chosen,
                ideal,
            },
        );
        let feedback: Feedback = exchange(self.client.as_ref(), request).await?;

        let was_ideal = index == scenario.ideal_choice_index;
        info!(chosen = index, was_ideal, "Scenario choice answered");
        Ok(ChoiceFeedback {
            chosen_index: index,
            ideal_index: scenario.ideal_choice_index,
            was_ideal,
            feedback: feedback.text,
        })
    }
}
