//! Text extraction for uploaded resumes.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text")]
    NotUtf8,

    #[error("Extraction worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

/// Decides how to read an upload from its declared content type, falling
/// back to the file extension.
pub fn detect_format(file_name: Option<&str>, content_type: Option<&str>) -> ResumeFormat {
    let is_pdf_type = content_type
        .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    let is_pdf_name = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);

    if is_pdf_type || is_pdf_name {
        ResumeFormat::Pdf
    } else {
        ResumeFormat::PlainText
    }
}

/// Extracts plain text from an uploaded resume.
/// PDF parsing runs on the blocking pool; a panic inside the parser surfaces
/// as `ExtractError::Worker` instead of taking the request down.
pub async fn extract_resume_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<String, ExtractError> {
    let format = detect_format(file_name, content_type);
    debug!("Extracting {} bytes as {:?}", data.len(), format);

    match format {
        ResumeFormat::Pdf => {
            let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await?
                .map_err(|e| {
                    warn!("PDF extraction failed: {e}");
                    ExtractError::Pdf(e.to_string())
                })?;
            Ok(text)
        }
        ResumeFormat::PlainText => {
            String::from_utf8(data.to_vec()).map_err(|_| ExtractError::NotUtf8)
        }
    }
}
