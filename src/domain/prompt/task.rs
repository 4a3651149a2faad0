//! Task bodies: the user-content half of every request.

use super::RequestKind;
use crate::domain::dialogue::PartnerRole;
use crate::domain::profile::{Age, AgeBracket};

/// One unit of work for the model, with the inputs that kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTask<'a> {
    FreeformChat {
        message: &'a str,
    },
    ScenarioGenerate,
    ScenarioFeedback {
        scenario: &'a str,
        chosen: &'a str,
        ideal: &'a str,
    },
    DialogueOpen {
        role: PartnerRole,
        description: &'a str,
    },
    DialogueContinue {
        role: PartnerRole,
        description: &'a str,
        opening_line: &'a str,
        /// Rendered `Label: text` lines, oldest first, ending with the new utterance.
        history: &'a str,
        utterance: &'a str,
    },
    StoryGenerate,
    TopicListGenerate,
    TopicDetailGenerate {
        topic_title: &'a str,
    },
}

impl PromptTask<'_> {
    pub fn kind(&self) -> RequestKind {
        match self {
            PromptTask::FreeformChat { .. } => RequestKind::FreeformChat,
            PromptTask::ScenarioGenerate => RequestKind::ScenarioGenerate,
            PromptTask::ScenarioFeedback { .. } => RequestKind::ScenarioFeedback,
            PromptTask::DialogueOpen { .. } => RequestKind::DialogueOpen,
            PromptTask::DialogueContinue { .. } => RequestKind::DialogueContinue,
            PromptTask::StoryGenerate => RequestKind::StoryGenerate,
            PromptTask::TopicListGenerate => RequestKind::TopicListGenerate,
            PromptTask::TopicDetailGenerate { .. } => RequestKind::TopicDetailGenerate,
        }
    }

    /// Renders the task body for a user of the given bracket and age.
    pub fn render(&self, bracket: AgeBracket, age: Age) -> String {
        match *self {
            PromptTask::FreeformChat { message } => message.trim().to_string(),
            PromptTask::ScenarioGenerate => scenario_generate(bracket, age),
            PromptTask::ScenarioFeedback {
                scenario,
                chosen,
                ideal,
            } => scenario_feedback(bracket, age, scenario, chosen, ideal),
            PromptTask::DialogueOpen { role, description } => {
                dialogue_open(bracket, age, role, description)
            }
            PromptTask::DialogueContinue {
                role,
                description,
                opening_line,
                history,
                utterance,
            } => dialogue_continue(bracket, age, role, description, opening_line, history, utterance),
            PromptTask::StoryGenerate => story_generate(bracket, age),
            PromptTask::TopicListGenerate => topic_list_generate(bracket, age),
            PromptTask::TopicDetailGenerate { topic_title } => {
                topic_detail_generate(bracket, age, topic_title)
            }
        }
    }
}

fn scenario_generate(bracket: AgeBracket, age: Age) -> String {
    format!(
        r#"Generate a short, interactive roleplay scenario suitable for a user in the '{bracket}' age group (age {age}).
The scenario should present a situation relevant to Indian youth/children and offer 2-3 distinct choices.
Format the output as a JSON object with EXACTLY these three keys: "scenario" (string), "choices" (array of 2-3 strings), and "idealChoiceIndex" (integer, 0-indexed, indicating which choice leads to the best outcome or learning).
Example for Teens (Indian context): {{"scenario": "Your cousin, Riya, is being teased online by some classmates after posting a picture. She seems upset but tells you not to tell anyone. What do you do?", "choices": ["Ignore it, it's not your business.", "Talk to Riya privately and encourage her to tell a trusted adult, offering to go with her.", "Confront the classmates online yourself."], "idealChoiceIndex": 1}}
Example for Kids (Indian context): {{"scenario": "You are playing in the park. An older person you don't know well, who lives nearby, offers you a chocolate to come to their house and see their new puppy. What do you do?", "choices": ["Take the chocolate and go with them.", "Say 'No, thank you' loudly, run to your parents or the adult you are with, and tell them.", "Politely say no and continue playing."], "idealChoiceIndex": 1}}"#
    )
}

fn scenario_feedback(
    bracket: AgeBracket,
    age: Age,
    scenario: &str,
    chosen: &str,
    ideal: &str,
) -> String {
    format!(
        r#"The user (age {age}, group '{bracket}') was presented with the scenario: "{scenario}".
They chose: "{chosen}".
The ideal choice was: "{ideal}".
Provide brief (1-3 sentences), constructive, and age-appropriate feedback in a supportive tone, keeping Indian cultural nuances in mind if relevant to the scenario.
If their choice was good, affirm it and briefly explain why. If it was not ideal, gently explain why and what a better approach might be, possibly referencing the ideal choice.
Format the output as a JSON object with a single key: "feedback" (string)."#
    )
}

fn dialogue_open(bracket: AgeBracket, age: Age, role: PartnerRole, description: &str) -> String {
    match role {
        PartnerRole::Child => format!(
            r#"You are an AI simulating a child. The user is an adult (age {age}) practicing how to answer a child's questions about topics related to bodies, growing up, relationships, or safety.
The user has described the child they are imagining as: "{description}".
Your role is to ask an age-appropriate, curious, and sometimes tricky question that a child of this description might ask an adult.
The question SHOULD be in a mix of Hinglish (Hindi mixed with English) and English, as a child in India might naturally speak. Use simple, conversational language.
Keep it innocent and inquisitive.
Format the output as a JSON object with EXACTLY one key: "ai_line" (string, which is the child's question).
Example (if qualities are 'curious 7-year-old'): {{"ai_line": "Mummy/Papa, where do babies come from? My friend Rina said a stork brings them, is that true?"}}"#
        ),
        role => {
            let noun = role.noun();
            format!(
                r#"You are an AI simulating a {noun} for a user aged {age} (group: {bracket}).
The user describes this {noun} as: "{description}".
This conversation is happening in an Indian context.
Generate a natural, age-appropriate opening line for this described {noun} to say to the user to start the conversation.
The response SHOULD be in a mix of Hinglish (Hindi mixed with English) and English, as naturally spoken in India, reflecting the described personality if possible. Keep it conversational.
Format the output as a JSON object with EXACTLY one key: "ai_line" (string).
Example (if topic is 'friend', qualities 'very supportive', user is teen): {{"ai_line": "Hey yaar, what's up? You seem a bit off today, sab theek hai na? You can tell me."}}"#
            )
        }
    }
}

fn dialogue_continue(
    bracket: AgeBracket,
    age: Age,
    role: PartnerRole,
    description: &str,
    opening_line: &str,
    history: &str,
    utterance: &str,
) -> String {
    let user_label = role.user_label();
    match role {
        PartnerRole::Child => format!(
            r#"Continue the simulated conversation. The user is an adult (age {age}) practicing answering a child's questions.
The child is described as: "{description}".
The child opened the conversation with: "{opening_line}".
Conversation history (last few turns, "{user_label}" is the adult practicing):
{history}
The adult ({user_label}) just said: "{utterance}" in response to the child's previous question/statement.
Now, as the simulated child, either ask a relevant follow-up question based on the adult's answer, OR ask a new, different (but still age-appropriate for "{description}") question.
The child's response SHOULD be in a mix of Hinglish (Hindi mixed with English) and English. Keep it innocent, curious, and reflective of the "{description}".
Format the output as a JSON object with EXACTLY one key: "ai_line" (string, which is the child's next question/statement)."#
        ),
        role => {
            let noun = role.noun();
            format!(
                r#"Continue the simulated conversation. The user (age {age}, group: {bracket}) is talking to a {noun} they described as "{description}".
This conversation is happening in an Indian context.
The {noun} opened the conversation with: "{opening_line}".
Conversation history (last few turns):
{history}
The user just said: "{utterance}".
Generate the described {noun}'s next natural, age-appropriate line in response.
The response SHOULD be in a mix of Hinglish (Hindi mixed with English) and English, as naturally spoken in India, reflecting the described personality ({description}) and the flow of the conversation.
Format the output as a JSON object with EXACTLY one key: "ai_line" (string)."#
            )
        }
    }
}

fn story_generate(bracket: AgeBracket, age: Age) -> String {
    format!(
        r#"Generate a short, fictional, age-appropriate story for a user in the '{bracket}' age group (age {age}).
The story should be relatable and have a subtle educational or reflective theme relevant to personal development, relationships, safety, or understanding emotions, suitable for an Indian context. Use Indian names or settings where appropriate without stereotyping.
After the story, provide 2-3 open-ended reflection questions about the story.
Your response MUST be a single, valid JSON object with EXACTLY these keys: "title" (string), "story_text" (string, can be a few paragraphs), "reflection_questions" (array of 2-3 strings).
Example for Teens (Indian context):
{{
  "title": "The Exam Pressure",
  "story_text": "Aarav felt a knot in his stomach. The board exams were next week, and everyone in his family kept talking about how important they were. His cousin, Priya, had topped her school last year, and Aarav felt the unspoken expectation. He hadn't told anyone he was struggling with maths...",
  "reflection_questions": [
    "How do you think Aarav is feeling? Why?",
    "What are some healthy ways Aarav could cope with this pressure?",
    "Have you ever felt similar pressure? What helped you?"
  ]
}}
IMPORTANT: Generate a NEW and UNIQUE story each time."#
    )
}

fn topic_list_generate(bracket: AgeBracket, age: Age) -> String {
    format!(
        r#"Generate a diverse list of 6 to 9 age-appropriate sex education/personal development topics for a user in the '{bracket}' age group (age {age}), considering an Indian context.
The topics should cover a good range of relevant subjects for this age group and be engaging.
Format the output as a JSON object with a single key "topics", which is an array of objects. Each object must have "title" (string, concise and appealing) and "description" (string, 1-2 engaging sentences).
Example for Teens (Indian context): {{"topics": [
    {{"title": "Navigating Puberty Confidently", "description": "Understand the physical and emotional changes during your teen years and how to manage them."}},
    {{"title": "Building Healthy Friendships", "description": "Explore what makes a good friend, setting boundaries, and handling peer pressure."}},
    {{"title": "Understanding Consent", "description": "What does consent really mean in all types of relationships? Why is it crucial?"}}
]}}"#
    )
}

fn topic_detail_generate(bracket: AgeBracket, age: Age, topic_title: &str) -> String {
    format!(
        r#"Generate detailed, age-appropriate educational content about "{topic_title}" for a user in the '{bracket}' age group (age {age}), keeping an Indian context in mind.
The content should be informative, respectful, medically accurate, and easy to understand. Use simple language for younger users and more comprehensive details for older ones.
Structure the content well. You can use HTML elements like <h4> for subheadings, <p> for paragraphs, <ul> and <li> for bullet points, or <ol> and <li> for numbered lists if appropriate for clarity and readability.
Ensure the response is comprehensive enough to be useful but not overwhelmingly long.
Format the output as a JSON object with a single key "content" (string) containing the educational text as an HTML string.
Example for a Kids topic "Body Safety": {{"content": "<h4>Your Body is Special!</h4><p>Everyone's body is special and private. It belongs to YOU!</p><ul><li>Your private parts are the parts of your body covered by your underwear or swimsuit.</li></ul><p>If someone tries to touch you in a way that makes you feel uncomfortable, tell a trusted grown-up immediately.</p>"}}
The "content" value should be a string containing well-formed HTML."#
    )
}
