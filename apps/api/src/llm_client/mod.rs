/// LLM Client: the single point of entry for all external model calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All generation goes through `LlmClient::generate`, usually via the
/// `QuestionGenerator` capability in `interview::orchestrator`.
///
/// Exactly one attempt per call. Callers degrade to deterministic output on failure,
/// so retrying here would only add latency.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
/// Non-2xx bodies are cut to this many characters in error messages.
const ERROR_BODY_LIMIT: usize = 300;

/// Everything that can make the generator unavailable. The Display text of each
/// variant is what ends up in a pack's `fallbackReason`.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing credential or other client configuration problem.
    #[error("{0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty output_text")]
    EmptyOutput,

    #[error("Failed to parse LLM response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    temperature: f64,
    input: Vec<InputMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputContent<'a>>,
}

#[derive(Debug, Serialize)]
struct InputContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    /// Convenience aggregate; not every deployment includes it.
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl ResponsesResponse {
    /// `output_text` when present and non-blank, else every `output_text` block joined.
    pub fn text(&self) -> Option<String> {
        if let Some(text) = self.output_text.as_deref().filter(|t| !t.trim().is_empty()) {
            return Some(text.to_string());
        }

        let joined: String = self
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|block| block.content_type == "output_text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Connection settings for the generator, taken from `Config`.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub timeout: std::time::Duration,
}

/// The single LLM client used by the service.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    temperature: f64,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            client: Client::builder()
                .timeout(settings.timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key: settings.api_key.filter(|key| !key.trim().is_empty()),
            model: settings.model,
            temperature: settings.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends `prompt` as a single user message and returns the raw response text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Config("OPENAI_API_KEY is not configured".into()))?;

        let request_body = build_request(&self.model, self.temperature, prompt);

        let response = self
            .client
            .post(OPENAI_RESPONSES_URL)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: ResponsesResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        parsed.text().ok_or(GenerationError::EmptyOutput)
    }
}

fn build_request<'a>(model: &'a str, temperature: f64, prompt: &'a str) -> ResponsesRequest<'a> {
    ResponsesRequest {
        model,
        temperature,
        input: vec![InputMessage {
            role: "user",
            content: vec![InputContent {
                content_type: "input_text",
                text: prompt,
            }],
        }],
    }
}
