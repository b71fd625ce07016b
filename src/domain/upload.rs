// An uploaded file as delivered by the host shell
use super::error::LoadError;

/// Coarse gate: a declared content type must be `application/*`.
/// Files without one are accepted.
pub fn check_content_type(content_type: Option<&str>) -> Result<(), LoadError> {
    match content_type {
        Some(ct) if !ct.is_empty() && !ct.starts_with("application/") => {
            Err(LoadError::FormatRejected(ct.to_string()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub text: String,
}

impl UploadedFile {
    pub fn new(name: Option<String>, content_type: Option<String>, text: String) -> Self {
        Self {
            name,
            content_type,
            text,
        }
    }

    pub fn check_content_type(&self) -> Result<(), LoadError> {
        check_content_type(self.content_type.as_deref())
    }

    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled")
    }
}
