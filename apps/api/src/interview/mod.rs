// Interview pack engine: signal extraction, template questions, prompt composition,
// response normalization, and the orchestrator that ties the two paths together.
// All generator calls go through the `QuestionGenerator` capability.

pub mod composer;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod resume_text;
pub mod signals;
pub mod templates;
