// Shared prompt fragments for every generator prompt.
// Feature-specific templates live next to the feature (e.g. interview/prompts.rs).

/// Enforces a bare JSON object as the whole response.
pub const JSON_ONLY_INSTRUCTION: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated questions anchored to what the resume actually says.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every question must be traceable to the resume text or to the detected \
    skills and keywords in the analysis context. Do NOT invent employers, projects, \
    or technologies the candidate never mentioned. If the resume is thin, ask broader \
    questions about the listed skills instead of fabricating specifics.";
