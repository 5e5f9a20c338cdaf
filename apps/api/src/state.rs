use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::PackOrchestrator;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every pack is built from scratch.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<PackOrchestrator>,
    /// Live client, kept here for health reporting. The orchestrator holds its own handle.
    pub llm: LlmClient,
    pub config: Config,
}
