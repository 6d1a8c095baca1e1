// SPDX-License-Identifier: MIT

//! Prompt templates and rendering.
//!
//! Pure functions from validated input to the system/user instruction
//! pair sent to the completion API. The main-reading system prompt casts
//! the assistant as a non-predictive pattern mirror and pins the output
//! to a seven-key JSON contract; the journal variant is a shorter,
//! free-text template.

use crate::models::UserInput;

/// Which optional lines the user prompt should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    pub include_time: bool,
    pub include_focus: bool,
}

impl PromptOptions {
    /// Derive the options from the input's optional fields.
    pub fn for_input(input: &UserInput) -> Self {
        Self {
            include_time: input.birth_time.is_some(),
            include_focus: input.focus_area.is_some(),
        }
    }
}

/// Fixed system instruction for the main reading.
pub fn reading_system_prompt() -> &'static str {
    r#"Purpose:
You are a reflection and pattern-synthesis tool that helps the user think more clearly when they feel stuck, overwhelmed, or unsure.

You may draw symbolic patterns and tendency frameworks from Vedic astrology, numerology, and Chinese astrology, but only as interpretive lenses, not as truth, fate, or prediction.

Your role is not to advise, decide, or predict.
Your role is to surface patterns the user may recognize and decide how to interpret.

Core principles

The user remains in control of all decisions and meaning.

You offer perspective, not answers.

You reduce confusion, not replace thinking.

All systems are used as mirrors, not authorities.

Hard rules

Do NOT predict the future.

Do NOT claim certainty or guaranteed outcomes.

Avoid words like "will", "always", "never".

Do NOT frame insights as destiny, fate, karma, or divine intent.

Do NOT use fear, urgency, or dependency language.

Do NOT tell the user what to do.

Do NOT give medical, legal, or financial instructions.

Do NOT assert that any system is objectively true.

How to use Vedic, Numerology, and Chinese systems

Treat each system as a pattern language, not a belief system.

Focus on tendencies, themes, and recurring dynamics.

Highlight areas where multiple systems point in a similar direction.

If signals differ, acknowledge contrast without resolving it.

Use phrasing like:

"Often associated with..."

"Tends to emphasize..."

"May reflect a pattern around..."

Tone

Very simple words.

Short, clear sentences.

Calm, friendly, non-judgmental.

Thoughtful and grounded.

Never mystical, dramatic, or motivational.

How to reason

Use pattern recognition across systems.

Speak in probabilities and observations.

Normalize the user's experience.

Reduce self-blame.

Keep interpretations open-ended.

Output format (must follow exactly)

Return valid JSON with these keys ONLY:
headline, coreTheme, strengths, watchOuts, next7Days, journalPrompt, disclaimer

JSON Schema

{
"headline": "string - 6-12 words",
"coreTheme": "string - 2-3 short sentences. Include one quiet mirror line that helps the user feel understood (e.g., 'You're not lazy - your mind is overloaded.')",
"strengths": ["array of exactly 3 strings, each <= 12 words"],
"watchOuts": ["array of exactly 2 strings, each <= 12 words"],
"next7Days": [
"array of exactly 3 strings, each:",
"- starts with a verb",
"- <= 10 words",
"- framed as focus areas, not instructions"
],
"journalPrompt": "string - one simple reflective question",
"disclaimer": "string - one sentence reminding this is a lens, not a rule, and the user decides what matters"
}

Engagement rule

Leave the user with a gentle sense of "this resonates, but I choose what to keep"
Do not ask follow-up questions.
Do not create urgency.

CRITICAL

Output ONLY valid JSON.
No markdown.
No explanations."#
}

/// Render the user instruction for the main reading.
pub fn reading_user_prompt(input: &UserInput) -> String {
    let options = PromptOptions::for_input(input);

    let mut prompt = String::from("Generate a life-pattern insights reading for:\n\n");
    prompt.push_str(&format!("Name: {}\n", input.name));
    prompt.push_str(&format!("Birth Date: {}\n", input.birth_date));

    if options.include_time {
        if let Some(time) = &input.birth_time {
            prompt.push_str(&format!("Birth Time: {}\n", time));
        }
    }

    prompt.push_str(&format!("Birth City: {}\n", input.birth_city));

    if options.include_focus {
        if let Some(focus) = &input.focus_area {
            prompt.push_str(&format!("\nCurrent Focus: {}\n", focus));
        }
    }

    prompt.push_str(&format!(
        "\nGenerate personalized insights that feel specific to {}. ",
        input.name
    ));
    prompt.push_str("Reference their city context lightly (no stereotypes). ");

    if options.include_focus {
        prompt.push_str("Pay special attention to their focus area. ");
    }

    prompt.push_str("\nRemember: Output ONLY valid JSON matching the schema. No markdown fences.");

    prompt
}

/// Fixed system instruction for answering a journal prompt.
pub fn journal_system_prompt() -> &'static str {
    r#"You are a thoughtful reflection assistant helping someone explore a journal prompt.

Your role is to:
- Provide a gentle, exploratory answer that helps the user think more deeply
- Use simple, clear language
- Avoid being prescriptive or directive
- Normalize their experience and reduce self-judgment
- Keep the tone warm, grounded, and non-mystical
- Frame insights as possibilities, not certainties

Use phrases like:
- "One way to think about this is..."
- "Some people find that..."
- "This might reflect..."
- "You could explore..."

Keep your response to 3-4 short paragraphs maximum.
Be conversational and supportive, not formal or clinical."#
}

/// Render the user instruction for the journal answer: the original
/// question restated, plus the same contextual fields when available.
pub fn journal_user_prompt(prompt_text: &str, input: Option<&UserInput>) -> String {
    let mut prompt = format!(
        "The user is reflecting on this question:\n\n\"{}\"\n\n",
        prompt_text
    );

    if let Some(input) = input {
        let options = PromptOptions::for_input(input);

        prompt.push_str("Context about the user:\n");
        prompt.push_str(&format!("Name: {}\n", input.name));
        prompt.push_str(&format!("Birth Date: {}\n", input.birth_date));
        if options.include_time {
            if let Some(time) = &input.birth_time {
                prompt.push_str(&format!("Birth Time: {}\n", time));
            }
        }
        prompt.push_str(&format!("Birth City: {}\n", input.birth_city));
        if options.include_focus {
            if let Some(focus) = &input.focus_area {
                prompt.push_str(&format!("Current Focus: {}\n", focus));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str("Provide a thoughtful, exploratory answer to help them reflect on this question.");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> UserInput {
        UserInput {
            name: "Ada".to_string(),
            birth_date: "1990-01-01".to_string(),
            birth_time: None,
            birth_city: "London, UK".to_string(),
            focus_area: None,
        }
    }

    #[test]
    fn system_prompt_pins_the_seven_keys() {
        let system = reading_system_prompt();
        for key in [
            "headline",
            "coreTheme",
            "strengths",
            "watchOuts",
            "next7Days",
            "journalPrompt",
            "disclaimer",
        ] {
            assert!(system.contains(key), "missing key {key}");
        }
        assert!(system.contains("Output ONLY valid JSON"));
    }

    #[test]
    fn user_prompt_omits_absent_optional_lines() {
        let prompt = reading_user_prompt(&base_input());
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("Birth Date: 1990-01-01"));
        assert!(prompt.contains("Birth City: London, UK"));
        assert!(!prompt.contains("Birth Time:"));
        assert!(!prompt.contains("Current Focus:"));
        assert!(prompt.ends_with("No markdown fences."));
    }

    #[test]
    fn user_prompt_includes_optional_lines_when_present() {
        let mut input = base_input();
        input.birth_time = Some("14:30".to_string());
        input.focus_area = Some("career change".to_string());

        let prompt = reading_user_prompt(&input);
        assert!(prompt.contains("Birth Time: 14:30"));
        assert!(prompt.contains("Current Focus: career change"));
        assert!(prompt.contains("Pay special attention to their focus area."));
    }

    #[test]
    fn prompt_options_follow_the_input() {
        let mut input = base_input();
        assert_eq!(
            PromptOptions::for_input(&input),
            PromptOptions {
                include_time: false,
                include_focus: false
            }
        );
        input.birth_time = Some("09:00".to_string());
        assert!(PromptOptions::for_input(&input).include_time);
    }

    #[test]
    fn journal_prompt_restates_the_question_and_context() {
        let input = base_input();
        let prompt = journal_user_prompt("What feels heavy right now?", Some(&input));
        assert!(prompt.contains("\"What feels heavy right now?\""));
        assert!(prompt.contains("Context about the user:"));
        assert!(prompt.contains("Name: Ada"));
    }

    #[test]
    fn journal_prompt_works_without_context() {
        let prompt = journal_user_prompt("What feels heavy right now?", None);
        assert!(prompt.contains("\"What feels heavy right now?\""));
        assert!(!prompt.contains("Context about the user:"));
    }
}
