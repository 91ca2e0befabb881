use std::path::Path;

use thiserror::Error;

use crate::constants::{ZIP_CONTENT_TYPES, ZIP_EXTENSION};

/// A candidate upload: the filename plus an optional declared content type.
/// Only the name is ever sent for analysis; no bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub content_type: Option<String>,
}

impl Upload {
    /// Surrounding whitespace is dropped so the name checked is the name
    /// analyzed and reported.
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self { name: name.trim().to_string(), content_type: None }
    }

    /// Upload named after the last component of `path`. The file itself is
    /// never opened and need not exist.
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string());
        Self::new(name)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Name ends in `.zip` (any case) or the content type is a ZIP type.
    pub fn is_zip(&self) -> bool {
        has_zip_extension(&self.name) || self.content_type.as_deref().is_some_and(is_zip_content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please choose a .zip file (got \"{0}\")")]
    NotZip(String),
    #[error("No file name given")]
    Empty,
}

/// Gate applied before any state change.
pub fn check_upload(upload: &Upload) -> Result<(), UploadError> {
    if upload.name.is_empty() {
        return Err(UploadError::Empty);
    }
    if !upload.is_zip() {
        return Err(UploadError::NotZip(upload.name.clone()));
    }
    Ok(())
}

fn has_zip_extension(name: &str) -> bool {
    name.len() >= ZIP_EXTENSION.len()
        && name.get(name.len() - ZIP_EXTENSION.len()..).is_some_and(|ext| ext.eq_ignore_ascii_case(ZIP_EXTENSION))
}

fn is_zip_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    ZIP_CONTENT_TYPES.iter().any(|t| t.eq_ignore_ascii_case(essence))
}
