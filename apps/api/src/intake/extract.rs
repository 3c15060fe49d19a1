//! Text extraction from validated uploads.
//!
//! PDF parsing is a statically linked dependency (`pdf-extract`) called as
//! an ordinary function; it runs under `spawn_blocking` because parsing is
//! CPU-bound. Word documents pass upload validation but are rejected here
//! with a typed failure — converting them is out of scope.

use bytes::Bytes;

use crate::errors::AppError;
use crate::intake::validation::FileKind;

/// Extracts raw text from the uploaded bytes according to the detected
/// format. Extracted text that is empty after trimming counts as a failure.
pub async fn extract_text(kind: FileKind, data: Bytes) -> Result<String, AppError> {
    let text = match kind {
        FileKind::Pdf => {
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .map_err(|e| AppError::Extraction(format!("extraction task failed: {e}")))?
                .map_err(|e| AppError::Extraction(format!("PDF parse failed: {e}")))?
        }
        FileKind::Text => String::from_utf8_lossy(&data).into_owned(),
        FileKind::Docx => {
            return Err(AppError::Extraction(
                "Word documents are not supported for extraction; upload a PDF or TXT file"
                    .to_string(),
            ));
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Extraction(
            "no text could be extracted from the document".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let data = Bytes::from_static(b"Jane Doe\nSoftware Engineer\n");
        let text = extract_text(FileKind::Text, data).await.unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decoded_lossily() {
        let data = Bytes::from_static(b"caf\xff");
        let text = extract_text(FileKind::Text, data).await.unwrap();
        assert!(text.starts_with("caf"));
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_extraction_failure() {
        let data = Bytes::from_static(b"   \n\t  ");
        assert!(matches!(
            extract_text(FileKind::Text, data).await,
            Err(AppError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_docx_is_rejected_at_extraction() {
        let data = Bytes::from_static(b"PK\x03\x04");
        assert!(matches!(
            extract_text(FileKind::Docx, data).await,
            Err(AppError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_extraction_failure() {
        let data = Bytes::from_static(b"not a pdf at all");
        assert!(matches!(
            extract_text(FileKind::Pdf, data).await,
            Err(AppError::Extraction(_))
        ));
    }
}
