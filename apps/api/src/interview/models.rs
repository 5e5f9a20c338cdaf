//! Interview pack data model: the JSON contract returned across the HTTP boundary.
//!
//! Field names serialize in camelCase (`fallbackReason`, `expectedSignals`) because
//! the browser client reads them directly.

use serde::{Deserialize, Serialize};

/// Hard cap on questions in any pack, fallback or AI.
pub const MAX_QUESTIONS: usize = 18;

/// Role used when the caller leaves it blank.
pub const DEFAULT_ROLE: &str = "Software Engineer";

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Estimated experience level. `Unknown` only appears on packs built from empty text;
/// signal extraction never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Mid,
    Senior,
    Unknown,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
            Level::Unknown => "unknown",
        }
    }

    /// Accepts exactly `junior`, `mid` or `senior`. Anything else (including `unknown`) is rejected.
    pub fn parse_known(value: &str) -> Option<Level> {
        match value {
            "junior" => Some(Level::Junior),
            "mid" => Some(Level::Mid),
            "senior" => Some(Level::Senior),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Opening,
    Scenario,
    Depth,
    Keyword,
    Behavioral,
    ProblemSolving,
    Screening,
    Technical,
    System,
    FollowUp,
}

/// Question difficulty. The template path tags skill questions with the level name
/// itself, so the level literals are valid difficulties too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Junior,
    Mid,
    Senior,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Junior => Difficulty::Junior,
            Level::Mid => Difficulty::Mid,
            Level::Senior => Difficulty::Senior,
            Level::Unknown => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackMode {
    Fallback,
    Ai,
}

// ────────────────────────────────────────────────────────────────────────────
// Pack items
// ────────────────────────────────────────────────────────────────────────────

/// A single interview question.
///
/// Unknown fields are denied so that a generator entry carrying extra keys is kept
/// verbatim as [`PackEntry::Raw`] instead of being silently trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Question {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    pub difficulty: Difficulty,
    pub question: String,
    /// AI path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_signals: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RubricItem {
    pub category: String,
    /// 0–100. Weights across a pack should total 100 when present (advisory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_good_looks_like: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_guide: Option<String>,
}

/// A pack item that is either schema-conforming or kept exactly as the generator sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackEntry<T> {
    Typed(T),
    Raw(serde_json::Value),
}

impl<T> PackEntry<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            PackEntry::Typed(item) => Some(item),
            PackEntry::Raw(_) => None,
        }
    }
}

impl<T> From<T> for PackEntry<T> {
    fn from(item: T) -> Self {
        PackEntry::Typed(item)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request-scoped values
// ────────────────────────────────────────────────────────────────────────────

/// Inputs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeInput {
    pub text: String,
    /// User-declared skills, in the order given. May overlap detected skills.
    pub desired_skills: Vec<String>,
    pub role: String,
}

impl ResumeInput {
    pub fn new(text: impl Into<String>, desired_skills: Vec<String>, role: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            desired_skills,
            role: role.into(),
        }
    }
}

/// Signals derived from resume text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSet {
    pub level: Level,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
}

/// The complete output artifact for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPack {
    pub role: String,
    pub level: Level,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
    pub rubric: Vec<PackEntry<RubricItem>>,
    pub questions: Vec<PackEntry<Question>>,
    pub mode: PackMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl InterviewPack {
    pub fn with_fallback_reason(mut self, reason: impl Into<String>) -> Self {
        self.fallback_reason = Some(reason.into());
        self
    }

    /// Sum of the weights on typed rubric items, or `None` when no item carries one.
    pub fn rubric_weight_total(&self) -> Option<f64> {
        let weights: Vec<f64> = self
            .rubric
            .iter()
            .filter_map(|entry| entry.typed().and_then(|item| item.weight))
            .collect();

        if weights.is_empty() {
            None
        } else {
            Some(weights.iter().sum())
        }
    }
}
