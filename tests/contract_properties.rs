//! Property tests for the strict-JSON response contract.

use proptest::prelude::*;

use beyond_whispers::domain::contract::{
    parse_and_validate, ContractViolation, Feedback, ParsedPayload, Scenario, Story, TopicList,
    TopicSummary,
};
use beyond_whispers::domain::prompt::RequestKind;

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.!?'\"{}-]{0,40}"
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (text(), prop::collection::vec(text(), 2..=3))
        .prop_flat_map(|(text, choices)| {
            let len = choices.len();
            (Just(text), Just(choices), 0..len)
        })
        .prop_map(|(text, choices, ideal_choice_index)| Scenario {
            text,
            choices,
            ideal_choice_index,
        })
}

fn story() -> impl Strategy<Value = Story> {
    (text(), text(), prop::collection::vec(text(), 1..=3)).prop_map(|(title, text, questions)| {
        Story {
            title,
            text,
            questions,
        }
    })
}

fn topic_list() -> impl Strategy<Value = TopicList> {
    prop::collection::vec(
        (text(), text()).prop_map(|(title, description)| TopicSummary { title, description }),
        1..=9,
    )
    .prop_map(|topics| TopicList { topics })
}

/// Serializes compactly or pretty, optionally inside a code fence.
fn wrap(json: String, pretty_json: String, style: u8) -> String {
    match style % 4 {
        0 => json,
        1 => format!("```json\n{}\n```", json),
        2 => format!("  ```\n{}\n```  ", pretty_json),
        _ => format!("\n{}\n", pretty_json),
    }
}

proptest! {
    #[test]
    fn scenario_round_trips(scenario in scenario(), style in any::<u8>()) {
        let raw = wrap(
            serde_json::to_string(&scenario).unwrap(),
            serde_json::to_string_pretty(&scenario).unwrap(),
            style,
        );
        prop_assert_eq!(
            parse_and_validate(RequestKind::ScenarioGenerate, &raw).unwrap(),
            ParsedPayload::Scenario(scenario)
        );
    }

    #[test]
    fn story_round_trips(story in story(), style in any::<u8>()) {
        let raw = wrap(
            serde_json::to_string(&story).unwrap(),
            serde_json::to_string_pretty(&story).unwrap(),
            style,
        );
        prop_assert_eq!(
            parse_and_validate(RequestKind::StoryGenerate, &raw).unwrap(),
            ParsedPayload::Story(story)
        );
    }

    #[test]
    fn topic_list_round_trips(list in topic_list(), style in any::<u8>()) {
        let raw = wrap(
            serde_json::to_string(&list).unwrap(),
            serde_json::to_string_pretty(&list).unwrap(),
            style,
        );
        prop_assert_eq!(
            parse_and_validate(RequestKind::TopicListGenerate, &raw).unwrap(),
            ParsedPayload::TopicList(list)
        );
    }

    #[test]
    fn prose_before_json_is_not_an_object(prefix in "[A-Za-z][A-Za-z !.]{0,20}", feedback in text()) {
        let json = serde_json::to_string(&Feedback { text: feedback }).unwrap();
        let raw = format!("{} {}", prefix, json);
        prop_assert!(
            matches!(
                parse_and_validate(RequestKind::ScenarioFeedback, &raw),
                Err(ContractViolation::NotAnObject { .. })
            ),
            "expected NotAnObject for {:?}",
            raw
        );
    }

    #[test]
    fn truncated_json_is_malformed(story in story(), cut in 1usize..20) {
        let json = serde_json::to_string(&story).unwrap();
        let end = json.len().saturating_sub(cut).max(1);
        let raw = &json[..end];
        // Cutting may land inside a string; only ASCII is generated, so any byte index is a char boundary.
        prop_assert!(
            matches!(
                parse_and_validate(RequestKind::StoryGenerate, raw),
                Err(ContractViolation::MalformedJson { .. })
            ),
            "expected MalformedJson for {:?}",
            raw
        );
    }

    #[test]
    fn out_of_range_ideal_index_is_shape_mismatch(scenario in scenario(), extra in 0usize..5) {
        let bad = Scenario {
            ideal_choice_index: scenario.choices.len() + extra,
            ..scenario
        };
        let raw = serde_json::to_string(&bad).unwrap();
        prop_assert!(
            matches!(
                parse_and_validate(RequestKind::ScenarioGenerate, &raw),
                Err(ContractViolation::ShapeMismatch { .. })
            ),
            "expected ShapeMismatch"
        );
    }
}

#[test]
fn scenario_without_ideal_index_is_shape_mismatch() {
    let raw = r#"{"scenario":"S","choices":["A","B"]}"#;
    assert!(matches!(
        parse_and_validate(RequestKind::ScenarioGenerate, raw),
        Err(ContractViolation::ShapeMismatch { .. })
    ));
}

#[test]
fn fenced_scenario_example() {
    let raw = "```json\n{\"scenario\":\"S\",\"choices\":[\"A\",\"B\"],\"idealChoiceIndex\":1}\n```";
    assert_eq!(
        parse_and_validate(RequestKind::ScenarioGenerate, raw).unwrap(),
        ParsedPayload::Scenario(Scenario {
            text: "S".into(),
            choices: vec!["A".into(), "B".into()],
            ideal_choice_index: 1,
        })
    );
}
