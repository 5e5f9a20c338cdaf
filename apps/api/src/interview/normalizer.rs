//! Response normalizer: turns raw generator text into an `ai`-mode pack.
//!
//! Best-effort repair, not schema validation: once the text parses as JSON this never
//! fails. Each top-level field has its own rule that either accepts the generator's
//! value (when the container shape is right) or falls back to the deterministic pack.
//! Individual questions and rubric items are not corrected; anything that does not
//! match the typed schema is carried through as raw JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::interview::models::{InterviewPack, Level, PackEntry, PackMode, MAX_QUESTIONS};
use crate::llm_client::GenerationError;

/// Strips fences, parses, and repairs the generator output against `defaults`.
pub fn normalize_response(
    raw: &str,
    defaults: &InterviewPack,
) -> Result<InterviewPack, GenerationError> {
    let text = strip_json_fences(raw);
    let parsed: Value = serde_json::from_str(text).map_err(GenerationError::Parse)?;
    Ok(normalize_value(&parsed, defaults))
}

/// Applies the per-field rules to an already-parsed document.
/// A non-object document simply yields every default.
pub fn normalize_value(parsed: &Value, defaults: &InterviewPack) -> InterviewPack {
    let mut questions = entries_rule(parsed.get("questions"), &defaults.questions);
    questions.truncate(MAX_QUESTIONS);

    InterviewPack {
        role: role_rule(parsed.get("role"), &defaults.role),
        level: level_rule(parsed.get("level"), defaults.level),
        skills: strings_rule(parsed.get("skills"), &defaults.skills),
        keywords: strings_rule(parsed.get("keywords"), &defaults.keywords),
        rubric: entries_rule(parsed.get("rubric"), &defaults.rubric),
        questions,
        mode: PackMode::Ai,
        fallback_reason: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field rules
// ────────────────────────────────────────────────────────────────────────────

/// Non-empty string, else the default role.
fn role_rule(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .filter(|role| !role.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Exactly `junior` / `mid` / `senior`, else the default level.
fn level_rule(value: Option<&Value>, default: Level) -> Level {
    value
        .and_then(Value::as_str)
        .and_then(Level::parse_known)
        .unwrap_or(default)
}

/// Any array, else the default list. Non-string items are dropped.
fn strings_rule(value: Option<&Value>, default: &[String]) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => default.to_vec(),
    }
}

/// Any array, else the default list. Items are typed when they fit, raw otherwise.
fn entries_rule<T>(value: Option<&Value>, default: &[PackEntry<T>]) -> Vec<PackEntry<T>>
where
    T: DeserializeOwned + Clone,
{
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).unwrap_or_else(|_| PackEntry::Raw(item.clone()))
            })
            .collect(),
        None => default.to_vec(),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from generator output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
