//! Prompt composer: builds the single instruction string sent to the generator.
//!
//! No validation happens here; the only contract is a complete, reproducible prompt
//! for the given inputs.

use serde_json::json;

use crate::interview::models::{InterviewPack, ResumeInput};
use crate::interview::prompts::PACK_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION};

/// Keywords forwarded to the generator as grounding context.
const GROUNDING_KEYWORDS: usize = 12;

/// Composes the generation prompt from the raw inputs and the fallback pack's signals.
pub fn compose_prompt(input: &ResumeInput, fallback: &InterviewPack) -> String {
    let desired_skills = json!(input.desired_skills).to_string();

    let analysis = json!({
        "level": fallback.level,
        "skills": fallback.skills,
        "keywords": fallback
            .keywords
            .iter()
            .take(GROUNDING_KEYWORDS)
            .collect::<Vec<_>>(),
    });
    let analysis_json =
        serde_json::to_string_pretty(&analysis).unwrap_or_else(|_| analysis.to_string());

    fill_template(
        PACK_PROMPT_TEMPLATE,
        &[
            ("{json_only}", JSON_ONLY_INSTRUCTION),
            ("{grounding_instruction}", GROUNDING_INSTRUCTION),
            ("{role}", input.role.as_str()),
            ("{desired_skills}", desired_skills.as_str()),
            ("{analysis_json}", analysis_json.as_str()),
            ("{resume_text}", input.text.as_str()),
        ],
    )
}

/// Single-pass placeholder substitution. Substituted values are never rescanned, so
/// resume text containing `{role}` and the like is emitted as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::signals::SignalTables;
    use crate::interview::templates::build_fallback_pack;

    fn sample() -> (ResumeInput, InterviewPack) {
        let input = ResumeInput::new(
            "Led Kubernetes migration and mentored engineers on Terraform and AWS.",
            vec!["Go".to_string()],
            "Staff Platform Engineer",
        );
        let fallback = build_fallback_pack(&input, &SignalTables::builtin());
        (input, fallback)
    }

    #[test]
    fn test_prompt_contains_inputs_and_rules() {
        let (input, fallback) = sample();
        let prompt = compose_prompt(&input, &fallback);

        assert!(prompt.contains("Staff Platform Engineer"));
        assert!(prompt.contains(r#"["Go"]"#));
        assert!(prompt.contains(&input.text));
        assert!(prompt.contains("between 10 and 14 questions"));
        assert!(prompt.contains("At least 3 questions of type \"technical\""));
        assert!(prompt.contains("At least 2 questions of type \"follow-up\""));
        assert!(prompt.contains("sum to exactly 100"));
        assert!(prompt.contains(r#""level": "junior" | "mid" | "senior""#));
        assert!(prompt.contains(r#""difficulty": "easy" | "medium" | "hard""#));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_prompt_embeds_grounding_context() {
        let (input, fallback) = sample();
        let prompt = compose_prompt(&input, &fallback);

        assert!(prompt.contains(r#""level": "senior""#));
        assert!(prompt.contains(r#""DevOps""#));
        assert!(prompt.contains(r#""Go""#));
    }

    #[test]
    fn test_prompt_limits_grounding_keywords_to_twelve() {
        let text: String = (0..30).map(|i| format!("keyword{i:02} ")).collect();
        let input = ResumeInput::new(text, vec![], "Engineer");
        let fallback = build_fallback_pack(&input, &SignalTables::builtin());
        let prompt = compose_prompt(&input, &fallback);
        let analysis_start = prompt.find("DETERMINISTIC ANALYSIS").unwrap();
        let resume_start = prompt.find("CANDIDATE RESUME").unwrap();
        let analysis = &prompt[analysis_start..resume_start];

        assert!(analysis.contains("keyword11"));
        assert!(!analysis.contains("keyword12"));
    }

    #[test]
    fn test_prompt_is_reproducible() {
        let (input, fallback) = sample();
        assert_eq!(
            compose_prompt(&input, &fallback),
            compose_prompt(&input, &fallback)
        );
    }

    #[test]
    fn test_placeholders_inside_values_are_not_expanded() {
        let input = ResumeInput::new("My template uses {role} and {desired_skills}", vec![], "QA");
        let fallback = build_fallback_pack(&input, &SignalTables::builtin());
        let prompt = compose_prompt(&input, &fallback);
        assert!(prompt.contains("My template uses {role} and {desired_skills}"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{analysis_json}"));
    }

    #[test]
    fn test_fill_template_keeps_unmatched_braces() {
        let filled = fill_template("{\"a\": {x}} {y}", &[("{x}", "1")]);
        assert_eq!(filled, "{\"a\": 1} {y}");
    }
}
