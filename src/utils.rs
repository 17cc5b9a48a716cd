// src/utils.rs
use crate::error::{Error, Result};

/// File types the parse-resume endpoint accepts.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| Error::Validation(format!("file has no extension: {filename}")))?;

    if !allowed.contains(&ext.as_str()) {
        return Err(Error::Validation(format!(
            "unsupported file extension: {ext}. Allowed: {allowed:?}"
        )));
    }

    Ok(())
}

/// Content type for a resume file, by extension.
pub fn content_type_for(file_name: &str) -> Result<&'static str> {
    match get_file_extension(file_name).as_deref() {
        Some("pdf") => Ok("application/pdf"),
        Some("doc") => Ok("application/msword"),
        Some("docx") => {
            Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        Some("txt") => Ok("text/plain"),
        _ => Err(Error::Validation(format!(
            "unsupported file format: {file_name}"
        ))),
    }
}

/// Shorten free text for single-line rendering.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
