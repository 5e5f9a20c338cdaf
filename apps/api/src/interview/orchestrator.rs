//! Pack orchestrator: the single entry point for interview pack generation.
//!
//! Flow: build fallback pack → (empty text? return it) → compose prompt →
//!       generator.generate() → normalize → ai pack.
//! Any generator or parse failure degrades to the fallback pack with `fallbackReason`
//! set; nothing is escalated to the caller.
//!
//! The generator is a capability passed in at construction (`Arc<dyn QuestionGenerator>`),
//! so tests run with mock generators side by side without shared state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::interview::composer::compose_prompt;
use crate::interview::models::{InterviewPack, ResumeInput};
use crate::interview::normalizer::normalize_response;
use crate::interview::signals::SignalTables;
use crate::interview::templates::build_fallback_pack;
use crate::llm_client::{GenerationError, LlmClient};

/// Rubric weights are asked to total this; checked for logging only.
const EXPECTED_RUBRIC_TOTAL: f64 = 100.0;
/// Slack for fractional weights such as 33.3 + 33.3 + 33.4.
const RUBRIC_TOTAL_TOLERANCE: f64 = 0.01;

fn rubric_total_matches(total: f64) -> bool {
    (total - EXPECTED_RUBRIC_TOTAL).abs() <= RUBRIC_TOTAL_TOLERANCE
}

// ────────────────────────────────────────────────────────────────────────────
// Generator capability
// ────────────────────────────────────────────────────────────────────────────

/// Prompt in, raw text out. Implementations own authentication and transport and
/// must fail on missing credentials, non-success status, or empty output.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl QuestionGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        LlmClient::generate(self, prompt).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PackOrchestrator {
    tables: Arc<SignalTables>,
    generator: Arc<dyn QuestionGenerator>,
}

impl PackOrchestrator {
    pub fn new(tables: Arc<SignalTables>, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { tables, generator }
    }

    /// Produces one pack per call. Never fails: a generator problem yields the
    /// deterministic pack in `fallback` mode.
    pub async fn generate(&self, input: &ResumeInput) -> InterviewPack {
        let span = info_span!("interview_pack", request_id = %Uuid::new_v4());
        self.generate_inner(input).instrument(span).await
    }

    async fn generate_inner(&self, input: &ResumeInput) -> InterviewPack {
        let fallback = build_fallback_pack(input, &self.tables);

        if input.text.trim().is_empty() {
            info!("Empty resume text, returning fallback pack without generator call");
            return fallback;
        }

        info!(
            "Fallback pack ready: level={}, skills={}, questions={}",
            fallback.level.as_str(),
            fallback.skills.len(),
            fallback.questions.len()
        );

        match self.try_generate(input, &fallback).await {
            Ok(pack) => {
                info!("Generator pack accepted with {} questions", pack.questions.len());
                if let Some(total) = pack.rubric_weight_total() {
                    if !rubric_total_matches(total) {
                        warn!("Generator rubric weights total {total}, expected 100");
                    }
                }
                pack
            }
            Err(e) => {
                warn!("Generator unavailable, using fallback pack: {e}");
                fallback.with_fallback_reason(e.to_string())
            }
        }
    }

    async fn try_generate(
        &self,
        input: &ResumeInput,
        fallback: &InterviewPack,
    ) -> Result<InterviewPack, GenerationError> {
        let prompt = compose_prompt(input, fallback);
        let raw = self.generator.generate(&prompt).await?;
        normalize_response(&raw, fallback)
    }
}
