//! Template question builder: deterministic question and rubric synthesis from signals.
//!
//! Zero external calls; always succeeds. The resulting pack is both the fallback answer
//! and the grounding context handed to the generator prompt.

use crate::interview::models::{
    Difficulty, InterviewPack, Level, PackMode, Question, QuestionType, ResumeInput, RubricItem,
    SignalSet, MAX_QUESTIONS,
};
use crate::interview::signals::{extract_signals, SignalTables};

/// Only the first few keywords get a dedicated question.
const KEYWORD_QUESTION_LIMIT: usize = 5;
/// The first keyword questions are `medium`, the rest `easy`.
const MEDIUM_KEYWORD_QUESTIONS: usize = 2;
/// Below this many questions the two padding questions are appended.
const PADDING_THRESHOLD: usize = 6;

/// Opening / scenario / depth templates for one level. `{skill}` is replaced verbatim.
struct SkillTemplates {
    opening: &'static str,
    scenario: &'static str,
    depth: &'static str,
}

const JUNIOR_TEMPLATES: SkillTemplates = SkillTemplates {
    opening: "Explain the fundamentals of {skill} and where you used it in your projects.",
    scenario: "You are assigned a bug in a {skill} feature. How would you debug it step by step?",
    depth: "What common mistakes do beginners make in {skill}, and how do you avoid them?",
};

const MID_TEMPLATES: SkillTemplates = SkillTemplates {
    opening: "Describe a production feature you built with {skill} and key trade-offs you made.",
    scenario: "If a {skill} module starts slowing down under load, what is your optimization plan?",
    depth: "How do you decide architecture boundaries when building with {skill}?",
};

const SENIOR_TEMPLATES: SkillTemplates = SkillTemplates {
    opening: "Walk through a high-impact system you led using {skill}, including measurable outcomes.",
    scenario: "How would you redesign a critical {skill} workflow to scale 10x while reducing risk?",
    depth: "What engineering standards and review practices do you enforce for {skill} initiatives?",
};

fn templates_for(level: Level) -> &'static SkillTemplates {
    match level {
        Level::Junior => &JUNIOR_TEMPLATES,
        Level::Senior => &SENIOR_TEMPLATES,
        Level::Mid | Level::Unknown => &MID_TEMPLATES,
    }
}

/// Three questions (opening, scenario, depth) for one skill, tagged with the level as difficulty.
pub fn skill_questions(skill: &str, level: Level) -> Vec<Question> {
    let templates = templates_for(level);
    [
        (QuestionType::Opening, templates.opening),
        (QuestionType::Scenario, templates.scenario),
        (QuestionType::Depth, templates.depth),
    ]
    .into_iter()
    .map(|(question_type, template)| Question {
        question_type,
        skill: Some(skill.to_string()),
        difficulty: Difficulty::from(level),
        question: template.replace("{skill}", skill),
        expected_signals: None,
    })
    .collect()
}

/// One question per keyword for the first five keywords.
pub fn keyword_questions(keywords: &[String]) -> Vec<Question> {
    keywords
        .iter()
        .take(KEYWORD_QUESTION_LIMIT)
        .enumerate()
        .map(|(index, keyword)| Question {
            question_type: QuestionType::Keyword,
            skill: None,
            difficulty: if index < MEDIUM_KEYWORD_QUESTIONS {
                Difficulty::Medium
            } else {
                Difficulty::Easy
            },
            question: format!(
                "Your resume mentions \"{keyword}\". Share a concrete project story where this \
                 keyword materially affected your decision-making."
            ),
            expected_signals: None,
        })
        .collect()
}

/// The fixed behavioral + problem-solving pair appended to thin packs.
pub fn padding_questions(role: &str) -> [Question; 2] {
    [
        Question {
            question_type: QuestionType::Behavioral,
            skill: None,
            difficulty: Difficulty::Medium,
            question: format!(
                "Tell me about a time you disagreed with a technical decision for a {role} role. \
                 What did you do?"
            ),
            expected_signals: None,
        },
        Question {
            question_type: QuestionType::ProblemSolving,
            skill: None,
            difficulty: Difficulty::Medium,
            question: "Given an ambiguous requirement, how do you transform it into a deliverable \
                       engineering plan?"
                .to_string(),
            expected_signals: None,
        },
    ]
}

/// Technical Depth, Problem Solving, Communication. Textual guides only, no weights.
pub fn default_rubric() -> Vec<RubricItem> {
    [
        (
            "Technical Depth",
            "Strong answers explain the underlying mechanics, name concrete tools and \
             trade-offs, and tie decisions to measurable results.",
        ),
        (
            "Problem Solving",
            "Strong answers break the problem down, state assumptions, compare options, \
             and describe how the outcome was validated.",
        ),
        (
            "Communication",
            "Strong answers are structured and concise, adapt to the audience, and make \
             their own contribution clear.",
        ),
    ]
    .into_iter()
    .map(|(category, guide)| RubricItem {
        category: category.to_string(),
        weight: None,
        what_good_looks_like: None,
        scoring_guide: Some(guide.to_string()),
    })
    .collect()
}

/// Assembles the question list for a signal set.
///
/// Order: skill questions (skill order), keyword questions, then padding if the list is
/// still under six. Truncated to 18, so earlier entries win.
pub fn build_questions(signals: &SignalSet, role: &str) -> Vec<Question> {
    let mut questions: Vec<Question> = signals
        .skills
        .iter()
        .flat_map(|skill| skill_questions(skill, signals.level))
        .collect();

    questions.extend(keyword_questions(&signals.keywords));

    if questions.len() < PADDING_THRESHOLD {
        questions.extend(padding_questions(role));
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

/// Builds the deterministic fallback pack.
///
/// Empty or whitespace-only text short-circuits: level `unknown`, the desired skills
/// exactly as given, and no keywords, rubric or questions.
pub fn build_fallback_pack(input: &ResumeInput, tables: &SignalTables) -> InterviewPack {
    let text = input.text.trim();
    if text.is_empty() {
        return InterviewPack {
            role: input.role.clone(),
            level: Level::Unknown,
            skills: input.desired_skills.clone(),
            keywords: vec![],
            rubric: vec![],
            questions: vec![],
            mode: PackMode::Fallback,
            fallback_reason: None,
        };
    }

    let signals = extract_signals(text, &input.desired_skills, tables);
    let questions = build_questions(&signals, &input.role);

    InterviewPack {
        role: input.role.clone(),
        level: signals.level,
        skills: signals.skills,
        keywords: signals.keywords,
        rubric: default_rubric().into_iter().map(Into::into).collect(),
        questions: questions.into_iter().map(Into::into).collect(),
        mode: PackMode::Fallback,
        fallback_reason: None,
    }
}
