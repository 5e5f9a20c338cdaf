//! Axum route handlers for the interview pack API.

use axum::{
    extract::{multipart::MultipartRejection, rejection::BytesRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::models::{InterviewPack, ResumeInput, DEFAULT_ROLE};
use crate::interview::resume_text::{extract_resume_text, UploadedResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/generate-questions`. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Anything that is not an array is ignored.
    #[serde(default)]
    pub desired_skills: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
}

impl GenerateQuestionsRequest {
    /// An empty body reads as `{}`; anything else must be a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
    }

    pub fn into_input(self) -> Result<ResumeInput, AppError> {
        Ok(ResumeInput::new(
            self.resume_text.unwrap_or_default(),
            desired_skills_from(self.desired_skills)?,
            role_or_default(self.role),
        ))
    }
}

fn desired_skills_from(value: Option<Value>) -> Result<Vec<String>, AppError> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(skill) => Ok(skill),
                other => Err(AppError::Validation(format!(
                    "desiredSkills must contain only strings, got {other}"
                ))),
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn role_or_default(role: Option<String>) -> String {
    role.filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

/// Comma-separated form value, blanks dropped.
fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-questions
///
/// Always answers 200 with a pack once the body is well-formed; generator failures
/// show up as `mode: "fallback"` plus `fallbackReason`.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<InterviewPack>, AppError> {
    let input = GenerateQuestionsRequest::from_body(&body?)?.into_input()?;

    Ok(Json(state.orchestrator.generate(&input).await))
}

/// POST /api/generate-questions/upload
///
/// Multipart form: `resume` (PDF or text file), optional `role`, optional
/// `desiredSkills` (comma-separated).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InterviewPack>, AppError> {
    let mut multipart = multipart?;

    let mut upload: Option<UploadedResume> = None;
    let mut role: Option<String> = None;
    let mut desired_skills = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                upload = Some(UploadedResume {
                    file_name,
                    content_type,
                    data,
                });
            }
            "role" => role = Some(field.text().await?),
            "desiredSkills" => desired_skills = split_skills(&field.text().await?),
            _ => {}
        }
    }

    let upload = upload
        .ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let text = extract_resume_text(upload).await?;
    let input = ResumeInput::new(text, desired_skills, role_or_default(role));

    Ok(Json(state.orchestrator.generate(&input).await))
}
