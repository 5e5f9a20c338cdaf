//! Resume text extraction for uploaded files. PDF goes through `pdf-extract`, anything else is decoded as UTF-8.

use anyhow::anyhow;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A resume file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedResume {
    /// Content type, `.pdf` extension, or the `%PDF-` header; any one is enough.
    pub fn is_pdf(&self) -> bool {
        let by_type = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
        let by_name = self
            .file_name
            .as_deref()
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));

        by_type || by_name || self.data.starts_with(PDF_MAGIC)
    }
}

/// Pulls plain text out of an uploaded resume.
///
/// PDF parsing runs on the blocking pool; a parser panic surfaces as a 400 rather than
/// taking the worker down.
pub async fn extract_resume_text(upload: UploadedResume) -> Result<String, AppError> {
    if !upload.is_pdf() {
        return String::from_utf8(upload.data.to_vec()).map_err(|_| {
            AppError::Validation("Resume file must be a PDF or UTF-8 text".to_string())
        });
    }

    debug!("Extracting text from PDF resume ({} bytes)", upload.data.len());
    let data = upload.data;
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Validation("Could not read PDF resume".to_string())
            } else {
                AppError::Internal(anyhow!("PDF extraction task failed: {e}"))
            }
        })?;

    extracted.map_err(|e| AppError::Validation(format!("Could not read PDF resume: {e}")))
}
