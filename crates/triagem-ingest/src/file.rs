//! Email input sources and upload file types.

use std::path::Path;

/// Supported upload types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Pdf,
    Unsupported,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            _ => Self::Unsupported,
        }
    }

    /// Detect file type from an uploaded filename.
    pub fn from_filename(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }
}

/// A file uploaded alongside the form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_filename(&self.name)
    }
}

/// Where the email text comes from. Exactly one source per request.
#[derive(Debug, Clone)]
pub enum EmailInput {
    RawText(String),
    File(UploadedFile),
}

impl EmailInput {
    /// Short label for logs.
    pub fn source(&self) -> &'static str {
        match self {
            Self::RawText(_) => "text",
            Self::File(_) => "file",
        }
    }
}
