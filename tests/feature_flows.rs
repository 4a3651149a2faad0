//! End-to-end flows through the feature handlers with a mock client.

use std::sync::Arc;
use std::time::Duration;

use beyond_whispers::adapters::ai::MockCompletionClient;
use beyond_whispers::adapters::profile::{FileProfileStore, InMemoryProfileStore};
use beyond_whispers::application::{
    ChatHandler, Control, DialogueHandler, FeatureError, ProfileHandler, RoleplayHandler,
    SessionContext, StoryHandler,
};
use beyond_whispers::domain::contract::Scenario;
use beyond_whispers::domain::dialogue::{DialogueState, PartnerRole, PROMPT_WINDOW};
use beyond_whispers::domain::profile::{AgeBracket, Feature, ProfileForm};
use beyond_whispers::domain::prompt::{RequestKind, JSON_INSTRUCTION};
use beyond_whispers::ports::CompletionFailure;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn onboard(age: &str) -> SessionContext {
    ProfileHandler::new(Arc::new(InMemoryProfileStore::new()))
        .submit(&ProfileForm::new("Asha", age, "Female"))
        .await
        .unwrap()
}

fn ai_line(text: &str) -> String {
    format!(r#"{{"ai_line":"{}"}}"#, text)
}

// =============================================================================
// Profile and feature gating
// =============================================================================

#[tokio::test]
async fn eight_year_old_gets_kids_features_only() {
    let store = InMemoryProfileStore::new();
    let profiles = ProfileHandler::new(Arc::new(store));
    let ctx = profiles
        .submit(&ProfileForm::new("Meera", "8", "Female"))
        .await
        .unwrap();

    let profile = ctx.profile().unwrap();
    assert_eq!(profile.bracket(), AgeBracket::Kids);

    let features: Vec<Feature> = profiles
        .dashboard(profile)
        .features
        .iter()
        .map(|d| d.feature)
        .collect();
    assert_eq!(features, vec![Feature::Chat, Feature::Stories, Feature::Topics]);

    let client = MockCompletionClient::new();
    let roleplay = RoleplayHandler::new(Arc::new(client.clone()));
    let dialogue = DialogueHandler::new(Arc::new(client.clone()));
    assert!(matches!(
        roleplay.generate(&ctx).await,
        Err(FeatureError::FeatureUnavailable { .. })
    ));
    assert!(matches!(
        dialogue.begin(&ctx).await,
        Err(FeatureError::FeatureUnavailable { .. })
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn age_four_is_rejected_and_five_is_kids() {
    let profiles = ProfileHandler::new(Arc::new(InMemoryProfileStore::new()));
    let err = profiles
        .submit(&ProfileForm::new("A", "4", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, FeatureError::Validation(_)));

    let ctx = profiles.submit(&ProfileForm::new("A", "5", "")).await.unwrap();
    assert_eq!(ctx.profile().unwrap().bracket(), AgeBracket::Kids);
}

#[tokio::test]
async fn start_over_forces_profile_again() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileProfileStore::new(dir.path().join("profile.yaml"));
    let profiles = ProfileHandler::new(Arc::new(store));
    profiles
        .submit(&ProfileForm::new("Ravi", "30", "Male"))
        .await
        .unwrap();

    let resumed = profiles.resume().await.unwrap();
    assert_eq!(resumed.profile().unwrap().name(), "Ravi");

    let ctx = profiles.start_over().await.unwrap();
    let chat = ChatHandler::new(Arc::new(MockCompletionClient::new()));
    let err = chat.send(&ctx, "hello").await.unwrap_err();
    assert!(err.requires_profile());
    assert!(profiles.resume().await.unwrap().profile().is_none());
}

// =============================================================================
// Prompt construction
// =============================================================================

#[tokio::test]
async fn strict_kinds_carry_json_instruction_and_freeform_does_not() {
    let client = MockCompletionClient::new()
        .with_reply("Hello!")
        .with_reply(r#"{"title":"T","story_text":"S","reflection_questions":["Q"]}"#);
    let ctx = onboard("15").await;

    ChatHandler::new(Arc::new(client.clone()))
        .send(&ctx, "hi")
        .await
        .unwrap();
    StoryHandler::new(Arc::new(client.clone()))
        .generate(&ctx)
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls[0].kind, RequestKind::FreeformChat);
    assert!(!calls[0].system_context.contains(JSON_INSTRUCTION));
    assert!(calls[1].system_context.ends_with(JSON_INSTRUCTION));
    assert!(calls[1].sampling.temperature < calls[0].sampling.temperature);
    assert!(calls[1].sampling.max_output_tokens > calls[0].sampling.max_output_tokens);
}

// =============================================================================
// Roleplay
// =============================================================================

#[tokio::test]
async fn fenced_scenario_then_feedback() {
    let client = MockCompletionClient::new()
        .with_reply("```json\n{\"scenario\":\"S\",\"choices\":[\"A\",\"B\"],\"idealChoiceIndex\":1}\n```")
        .with_reply(r#"{"feedback":"Good thinking."}"#);
    let roleplay = RoleplayHandler::new(Arc::new(client));
    let ctx = onboard("15").await;

    let scenario = roleplay.generate(&ctx).await.unwrap();
    assert_eq!(
        scenario,
        Scenario {
            text: "S".into(),
            choices: vec!["A".into(), "B".into()],
            ideal_choice_index: 1,
        }
    );

    let result = roleplay.choose(&ctx, 1).await.unwrap();
    assert!(result.was_ideal);
    assert_eq!(result.feedback, "Good thinking.");
}

// =============================================================================
// Dialogue
// =============================================================================

#[tokio::test]
async fn dialogue_turns_and_window() {
    let client = MockCompletionClient::new().with_reply(ai_line("Hey yaar!"));
    let dialogue = DialogueHandler::new(Arc::new(client.clone()));
    let ctx = onboard("20").await;

    dialogue.begin(&ctx).await.unwrap();
    dialogue
        .select_partner(&ctx, PartnerRole::Friend)
        .await
        .unwrap();
    let opening = dialogue.describe(&ctx, "very supportive").await.unwrap();
    assert_eq!(opening.line, "Hey yaar!");

    let exchanges = 5;
    for n in 0..exchanges {
        client.push_reply(ai_line(&format!("partner {}", n)));
        dialogue.send(&ctx, &format!("user {}", n)).await.unwrap();

        let session = ctx.dialogue().await;
        assert_eq!(session.turns().len(), 2 * (n + 1));
    }

    let session = ctx.dialogue().await;
    let window = session.window();
    assert_eq!(window.len(), PROMPT_WINDOW.min(session.turns().len()));
    assert_eq!(window, &session.turns()[session.turns().len() - PROMPT_WINDOW..]);
    drop(session);

    dialogue.restart(&ctx).await;
    let session = ctx.dialogue().await;
    assert_eq!(session.state(), DialogueState::Idle);
    assert!(session.turns().is_empty());
    assert!(session.role().is_none());
    assert!(session.description().is_none());
}

// =============================================================================
// Concurrency guard
// =============================================================================

#[tokio::test]
async fn second_send_while_pending_is_busy() {
    let client = MockCompletionClient::new()
        .with_reply("first")
        .with_reply("second")
        .with_delay(Duration::from_millis(100));
    let chat = ChatHandler::new(Arc::new(client.clone()));
    let ctx = onboard("15").await;

    let (first, second) = futures::join!(chat.send(&ctx, "one"), chat.send(&ctx, "two"));

    assert_eq!(first.unwrap(), "first");
    assert_eq!(
        second.unwrap_err(),
        FeatureError::Busy {
            control: Control::ChatSend
        }
    );
    assert_eq!(client.call_count(), 1);

    // Released after settling.
    assert!(!ctx.controls().is_busy(Control::ChatSend));
    assert_eq!(chat.send(&ctx, "three").await.unwrap(), "second");
}

#[tokio::test]
async fn control_is_released_after_failure() {
    let client = MockCompletionClient::new()
        .with_failure(CompletionFailure::server_error(500, "boom"))
        .with_reply(r#"{"title":"T","story_text":"S","reflection_questions":["Q"]}"#);
    let stories = StoryHandler::new(Arc::new(client));
    let ctx = onboard("12").await;

    let err = stories.generate(&ctx).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.user_message().ends_with("Please try again."));
    assert!(!ctx.controls().is_busy(Control::StoryGenerate));

    assert!(stories.another(&ctx).await.is_ok());
}

#[tokio::test]
async fn chat_failures_explain_what_to_do() {
    let client = MockCompletionClient::new()
        .with_failure(CompletionFailure::rate_limited("quota"))
        .with_failure(CompletionFailure::safety_blocked("SAFETY"));
    let chat = ChatHandler::new(Arc::new(client));
    let ctx = onboard("19").await;

    let err = chat.send(&ctx, "first").await.unwrap_err();
    assert!(err.user_message().contains("wait a bit"));
    assert!(err.is_retryable());
    assert!(ctx.transcript().await.last().unwrap().text.contains("wait a bit"));

    let err = chat.send(&ctx, "second").await.unwrap_err();
    assert!(err.user_message().contains("rephrase"));
    assert!(!ctx.transcript().await.has_pending());
}
