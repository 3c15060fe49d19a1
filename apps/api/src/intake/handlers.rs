//! Axum route handler for the upload/extraction endpoint.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::intake::extract::extract_text;
use crate::intake::validation::validate_upload;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub name: String,
    pub size_bytes: usize,
}

/// POST /api/extract
///
/// Accepts a multipart upload with a `file` part, validates type and size,
/// and returns the extracted raw text. Nothing is persisted: the bytes live
/// for the duration of this request only.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file part: {e}")))?;

        let kind = validate_upload(&name, mime_type.as_deref(), data.len())?;
        let size_bytes = data.len();
        let text = extract_text(kind, data).await?;

        info!(
            "Extracted {} chars from '{}' ({:?}, {} bytes)",
            text.len(),
            name,
            kind,
            size_bytes
        );

        return Ok(Json(ExtractResponse {
            text,
            name,
            size_bytes,
        }));
    }

    Err(AppError::Validation(
        "Missing 'file' part in multipart body".to_string(),
    ))
}
