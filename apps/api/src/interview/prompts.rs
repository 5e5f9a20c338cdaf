// Prompt templates for interview pack generation.
// Filled by `interview::composer`; placeholders are `{name}` and are substituted in one pass.

/// Pack generation prompt.
/// Replace: {json_only}, {grounding_instruction}, {role}, {desired_skills},
///          {analysis_json}, {resume_text}
pub const PACK_PROMPT_TEMPLATE: &str = r#"{json_only}

You are a senior technical interviewer preparing a personalized interview for a candidate.

{grounding_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "role": "string",
  "level": "junior" | "mid" | "senior",
  "skills": ["string"],
  "keywords": ["string"],
  "rubric": [
    {"category": "string", "weight": 0-100, "whatGoodLooksLike": "string"}
  ],
  "questions": [
    {
      "type": "screening" | "technical" | "system" | "behavioral" | "follow-up",
      "skill": "string",
      "difficulty": "easy" | "medium" | "hard",
      "question": "string",
      "expectedSignals": ["string"]
    }
  ]
}

HARD RULES:
1. Produce between 10 and 14 questions
2. At least 3 questions of type "technical"
3. At least 2 questions of type "follow-up" that dig into claims made in the resume
4. At least 1 question of type "behavioral"
5. At least 1 question of type "system" when the role or resume involves design or architecture
6. Rubric weights MUST sum to exactly 100
7. Every question must name a skill or a concrete resume detail
8. Calibrate difficulty to the candidate level

TARGET ROLE:
{role}

DESIRED SKILLS (declared by the interviewer):
{desired_skills}

DETERMINISTIC ANALYSIS (use as grounding context, refine if the resume clearly disagrees):
{analysis_json}

CANDIDATE RESUME:
{resume_text}"#;
