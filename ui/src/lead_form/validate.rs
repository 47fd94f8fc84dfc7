use thiserror::Error;

use crate::core::lang::Lang;
use crate::tr;

pub const MAX_FILES: usize = 3;
/// 25 MiB; a file of exactly this size is accepted.
pub const MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".pdf", ".dwg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }

    /// Lower-cased extension including the dot; empty without one.
    pub fn extension(&self) -> String {
        let lower = self.name.to_lowercase();
        match lower.rfind('.') {
            Some(dot) => lower[dot..].to_string(),
            None => String::new(),
        }
    }
}

/// What the visitor typed into the lead form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub name: String,
    pub email: String,
    pub message: String,
    pub consent: bool,
    pub topic: Option<String>,
    pub files: Vec<Attachment>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name, email and message are required")]
    MissingFields,
    #[error("consent checkbox not ticked")]
    MissingConsent,
    #[error("{count} files attached, at most {max} allowed")]
    TooManyFiles { count: usize, max: usize },
    #[error("file type not allowed: {0}")]
    FileType(String),
    #[error("file too large: {0}")]
    FileTooLarge(String),
}

impl ValidationError {
    pub fn message(&self, lang: Lang) -> String {
        match self {
            ValidationError::MissingFields => tr!(lang, "form-missing-fields"),
            ValidationError::MissingConsent => tr!(lang, "form-missing-consent"),
            ValidationError::TooManyFiles { max, .. } => tr!(lang, "form-too-many-files", max = max.to_string()),
            ValidationError::FileType(name) => tr!(lang, "form-file-type", name = name.as_str()),
            ValidationError::FileTooLarge(name) => tr!(lang, "form-file-too-large", name = name.as_str()),
        }
    }
}

/// Checks run in the order the visitor fixes them: required text fields,
/// consent, file count, then each file's type and size.
pub fn validate(fields: &LeadFields) -> Result<(), ValidationError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&fields.name) || blank(&fields.email) || blank(&fields.message) {
        return Err(ValidationError::MissingFields);
    }
    if !fields.consent {
        return Err(ValidationError::MissingConsent);
    }
    if fields.files.len() > MAX_FILES {
        return Err(ValidationError::TooManyFiles {
            count: fields.files.len(),
            max: MAX_FILES,
        });
    }
    for file in &fields.files {
        if !ALLOWED_EXTENSIONS.contains(&file.extension().as_str()) {
            return Err(ValidationError::FileType(file.name.clone()));
        }
        if file.size > MAX_FILE_SIZE {
            return Err(ValidationError::FileTooLarge(file.name.clone()));
        }
    }
    Ok(())
}
