//! Upload validation: type allow-list, size ceiling, empty rejection.
//! Pure functions — the multipart handler calls these before any byte of
//! the file is interpreted.

use crate::errors::AppError;

/// Hard ceiling on accepted uploads: 10 MB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const MIME_PDF: &str = "application/pdf";
const MIME_TEXT: &str = "text/plain";
const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the service accepts at the upload boundary.
/// `Docx` passes validation but is rejected later at extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
    Docx,
}

/// Resolves the file kind from the declared MIME type, falling back to the
/// filename extension (browsers leave `content_type` empty or generic for
/// some drag-and-drop sources).
pub fn detect_kind(file_name: &str, mime_type: Option<&str>) -> Option<FileKind> {
    match mime_type {
        Some(MIME_PDF) => return Some(FileKind::Pdf),
        Some(MIME_TEXT) => return Some(FileKind::Text),
        Some(MIME_DOCX) => return Some(FileKind::Docx),
        _ => {}
    }
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        Some(FileKind::Pdf)
    } else if lower.ends_with(".txt") {
        Some(FileKind::Text)
    } else if lower.ends_with(".docx") {
        Some(FileKind::Docx)
    } else {
        None
    }
}

/// Validates an upload before extraction. Order matters: type first, then
/// emptiness, then size, so the user sees the most actionable message.
pub fn validate_upload(
    file_name: &str,
    mime_type: Option<&str>,
    size_bytes: usize,
) -> Result<FileKind, AppError> {
    let kind = detect_kind(file_name, mime_type)
        .ok_or_else(|| AppError::UnsupportedFileType(file_name.to_string()))?;

    if size_bytes == 0 {
        return Err(AppError::EmptyFile);
    }
    if size_bytes > MAX_FILE_SIZE {
        return Err(AppError::FileTooLarge(size_bytes as u64));
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_mime() {
        assert_eq!(
            detect_kind("cv", Some("application/pdf")),
            Some(FileKind::Pdf)
        );
        assert_eq!(detect_kind("cv", Some("text/plain")), Some(FileKind::Text));
        assert_eq!(detect_kind("cv", Some(MIME_DOCX)), Some(FileKind::Docx));
    }

    #[test]
    fn test_detect_by_extension_fallback() {
        assert_eq!(detect_kind("cv.PDF", None), Some(FileKind::Pdf));
        assert_eq!(
            detect_kind("notes.txt", Some("application/octet-stream")),
            Some(FileKind::Text)
        );
        assert_eq!(detect_kind("cv.docx", None), Some(FileKind::Docx));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(detect_kind("photo.png", Some("image/png")).is_none());
        assert!(matches!(
            validate_upload("photo.png", Some("image/png"), 100),
            Err(AppError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(
            validate_upload("cv.pdf", None, 0),
            Err(AppError::EmptyFile)
        ));
    }

    #[test]
    fn test_size_ceiling() {
        assert!(validate_upload("cv.pdf", None, MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            validate_upload("cv.pdf", None, MAX_FILE_SIZE + 1),
            Err(AppError::FileTooLarge(_))
        ));
    }
}
