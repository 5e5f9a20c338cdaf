//! Text signal extraction: keywords, detected skills, and an experience-level estimate
//! derived purely from resume text. No I/O, no LLM calls.
//!
//! Pattern tables live in [`SignalTables`] so callers (and tests) can swap them out;
//! extending detection means adding a table row, not changing the functions below.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::interview::models::{Level, SignalSet};

/// Keywords longer than this many characters are kept.
const MIN_KEYWORD_LEN: usize = 3;
const MAX_KEYWORDS: usize = 40;

/// Built-in skill categories, evaluated in this order.
///
/// Terms are anchored at the start of a word only, so stems also catch inflected and
/// compound spellings ("Dockerized", "PostgreSQL", "unit tests"). JavaScript is the
/// exception and must match whole words.
const BUILTIN_SKILLS: &[(&str, &str)] = &[
    ("JavaScript", r"\b(?:js|javascript|node|es6|typescript)\b"),
    ("Python", r"\b(?:python|pandas|numpy|fastapi|django|flask)"),
    ("React", r"\b(?:react|next\.js|redux|hooks)"),
    ("SQL", r"\b(?:sql|postgres|mysql|sqlite|query optimization)"),
    ("DevOps", r"\b(?:docker|kubernetes|ci/cd|terraform|aws|azure|gcp)"),
    (
        "Testing",
        r"\b(?:jest|cypress|playwright|unit test|integration test|tdd)",
    ),
    (
        "SystemDesign",
        r"\b(?:system design|microservices|scalability|distributed systems)",
    ),
    (
        "DataScience",
        r"\b(?:machine learning|deep learning|nlp|classification|regression)",
    ),
];

const SENIOR_MARKERS: &str = r"\b(?:lead|senior|architect|managed|mentored|owned)\b";
const MID_MARKERS: &str = r"\b(?:built|implemented|designed|optimized|deployed)\b";
const JUNIOR_MARKERS: &str = r"\b(?:learned|assisted|intern|course|academic)\b";

/// A named skill category and the case-insensitive matcher that detects it.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    pub label: String,
    matcher: Regex,
}

impl SkillPattern {
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Process-wide constant configuration for signal extraction.
/// Shared read-only behind an `Arc`; never mutated after construction.
#[derive(Debug, Clone)]
pub struct SignalTables {
    skills: Vec<SkillPattern>,
    senior: Regex,
    mid: Regex,
    junior: Regex,
}

impl SignalTables {
    /// Builds tables from `(label, pattern)` rows plus the three proficiency patterns.
    /// All patterns are compiled case-insensitive.
    pub fn new(
        skills: &[(&str, &str)],
        senior: &str,
        mid: &str,
        junior: &str,
    ) -> Result<Self, regex::Error> {
        let skills = skills
            .iter()
            .map(|(label, pattern)| {
                Ok(SkillPattern {
                    label: (*label).to_string(),
                    matcher: case_insensitive(pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            skills,
            senior: case_insensitive(senior)?,
            mid: case_insensitive(mid)?,
            junior: case_insensitive(junior)?,
        })
    }

    /// The eight built-in skill categories and default proficiency markers.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_SKILLS, SENIOR_MARKERS, MID_MARKERS, JUNIOR_MARKERS)
            .expect("built-in signal patterns must compile")
    }
}

impl Default for SignalTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cases the text, blanks every character outside `[a-z0-9+#.]` and whitespace,
/// then keeps distinct tokens longer than three characters in first-seen order (max 40).
///
/// Tokens such as `c++`, `c#` and `node.js` survive intact.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '+' | '#' | '.')
                || c.is_whitespace()
            {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|token| token.len() > MIN_KEYWORD_LEN)
        .filter(|token| seen.insert(*token))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Matched table categories (table order) followed by the caller's desired skills
/// (trimmed, blanks dropped, caller order). Duplicates collapse case-sensitively.
pub fn detect_skills(
    resume_text: &str,
    desired_skills: &[String],
    tables: &SignalTables,
) -> Vec<String> {
    let detected = tables
        .skills
        .iter()
        .filter(|pattern| pattern.is_match(resume_text))
        .map(|pattern| pattern.label.clone());

    let desired = desired_skills
        .iter()
        .map(|skill| skill.trim())
        .filter(|skill| !skill.is_empty())
        .map(str::to_string);

    let mut seen = HashSet::new();
    detected
        .chain(desired)
        .filter(|skill| seen.insert(skill.clone()))
        .collect()
}

/// Priority-ordered: senior markers, then mid, then junior. No marker at all → `Mid`.
pub fn estimate_level(resume_text: &str, tables: &SignalTables) -> Level {
    if tables.senior.is_match(resume_text) {
        Level::Senior
    } else if tables.mid.is_match(resume_text) {
        Level::Mid
    } else if tables.junior.is_match(resume_text) {
        Level::Junior
    } else {
        Level::Mid
    }
}

/// Runs all three extractors over already-trimmed resume text.
pub fn extract_signals(text: &str, desired_skills: &[String], tables: &SignalTables) -> SignalSet {
    SignalSet {
        level: estimate_level(text, tables),
        skills: detect_skills(text, desired_skills, tables),
        keywords: extract_keywords(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SignalTables {
        SignalTables::builtin()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_skills_merges_detected_and_desired() {
        let resume = "Built React dashboards with JavaScript and optimized SQL queries.";
        let skills = detect_skills(resume, &strings(&["GraphQL"]), &tables());
        assert_eq!(skills, strings(&["JavaScript", "React", "SQL", "GraphQL"]));
    }

    #[test]
    fn test_detect_skills_trims_drops_blanks_and_dedups() {
        let resume = "Shipped Django services backed by Postgres.";
        let desired = strings(&["  Python ", "", "   ", "Leadership", "Leadership", "python"]);
        let skills = detect_skills(resume, &desired, &tables());
        // "Python" is already detected; "python" differs by case so it is kept.
        assert_eq!(skills, strings(&["Python", "SQL", "Leadership", "python"]));
    }

    #[test]
    fn test_detect_skills_every_desired_skill_present() {
        let desired = strings(&["Rust", "Go", "Communication"]);
        let skills = detect_skills("No recognised tooling here.", &desired, &tables());
        for skill in &desired {
            assert!(skills.contains(skill), "missing desired skill {skill}");
        }
    }

    #[test]
    fn test_detect_skills_is_case_insensitive() {
        let skills = detect_skills("DOCKER and KUBERNETES on GCP", &[], &tables());
        assert_eq!(skills, strings(&["DevOps"]));
    }

    #[test]
    fn test_detect_skills_multiword_and_punctuated_patterns() {
        let resume = "Owned CI/CD, wrote unit test suites, and studied distributed systems.";
        let skills = detect_skills(resume, &[], &tables());
        assert_eq!(skills, strings(&["DevOps", "Testing", "SystemDesign"]));
    }

    #[test]
    fn test_detect_skills_plural_and_compound_spellings() {
        let resume = "Wrote unit tests and integration tests against PostgreSQL; \
                      Dockerized services; ReactJS frontends";
        let skills = detect_skills(resume, &[], &tables());
        assert_eq!(skills, strings(&["React", "SQL", "DevOps", "Testing"]));
    }

    #[test]
    fn test_detect_skills_terms_must_start_a_word() {
        let skills = detect_skills("Studied contract laws and unreacted samples", &[], &tables());
        assert!(skills.is_empty());
    }

    #[test]
    fn test_custom_tables_replace_builtin() {
        let custom = SignalTables::new(
            &[("Rust", r"\b(?:rust|cargo|tokio)\b")],
            r"\bprincipal\b",
            r"\bshipped\b",
            r"\bbootcamp\b",
        )
        .unwrap();

        let skills = detect_skills("Wrote Tokio services in Python", &[], &custom);
        assert_eq!(skills, strings(&["Rust"]));
        assert_eq!(estimate_level("Principal engineer", &custom), Level::Senior);
        assert_eq!(estimate_level("Finished a bootcamp", &custom), Level::Junior);
    }

    #[test]
    fn test_custom_tables_reject_invalid_pattern() {
        let result = SignalTables::new(&[("Broken", r"(unclosed")], "a", "b", "c");
        assert!(result.is_err());
    }

    #[test]
    fn test_estimate_level_senior_language() {
        let text = "Led architecture reviews and mentored 8 engineers.";
        assert_eq!(estimate_level(text, &tables()), Level::Senior);
        // Pure and repeatable.
        assert_eq!(estimate_level(text, &tables()), Level::Senior);
    }

    #[test]
    fn test_estimate_level_priority_order() {
        let t = tables();
        assert_eq!(
            estimate_level("Assisted the team and later managed the release", &t),
            Level::Senior
        );
        assert_eq!(
            estimate_level("Learned Go, then implemented the billing API", &t),
            Level::Mid
        );
        assert_eq!(
            estimate_level("Summer intern who assisted with QA", &t),
            Level::Junior
        );
    }

    #[test]
    fn test_estimate_level_defaults_to_mid_without_markers() {
        assert_eq!(
            estimate_level("Enjoys hiking and photography.", &tables()),
            Level::Mid
        );
    }

    #[test]
    fn test_estimate_level_requires_whole_words() {
        // "leader" and "builtin" must not trip the senior / mid markers.
        assert_eq!(
            estimate_level("Team leader of builtin tooling, took a course", &tables()),
            Level::Junior
        );
    }

    #[test]
    fn test_extract_keywords_preserves_symbol_tokens() {
        let keywords = extract_keywords("Wrote C++ and C# services; migrated to Node.js (2021)!");
        assert_eq!(
            keywords,
            strings(&["wrote", "services", "migrated", "node.js", "2021"])
        );
    }

    #[test]
    fn test_extract_keywords_short_tokens_dropped() {
        let keywords = extract_keywords("c++ go sql rust java");
        assert_eq!(keywords, strings(&["rust", "java"]));
        assert!(keywords.iter().all(|k| k.len() > 3));
    }

    #[test]
    fn test_extract_keywords_dedups_in_first_seen_order() {
        let keywords = extract_keywords("Kafka pipelines. kafka PIPELINES again, Kafka");
        assert_eq!(keywords, strings(&["kafka", "pipelines.", "pipelines", "again"]));
    }

    #[test]
    fn test_extract_keywords_caps_at_forty() {
        let text: String = (0..100).map(|i| format!("token{i} ")).collect();
        let keywords = extract_keywords(&text);
        assert_eq!(keywords.len(), 40);
        assert_eq!(keywords[0], "token0");
        assert_eq!(keywords[39], "token39");
    }

    #[test]
    fn test_extract_keywords_empty_text() {
        assert!(extract_keywords("   \n\t ").is_empty());
    }

    #[test]
    fn test_extract_signals_combines_extractors() {
        let signals = extract_signals(
            "Implemented Docker CI/CD with Python APIs",
            &strings(&["Communication"]),
            &tables(),
        );
        assert_eq!(signals.level, Level::Mid);
        assert_eq!(signals.skills, strings(&["Python", "DevOps", "Communication"]));
        assert_eq!(signals.keywords[0], "implemented");
    }
}
