//! Text extraction from typed content or uploaded TXT/PDF files.

use thiserror::Error;
use tracing::debug;

use crate::file::{EmailInput, FileType, UploadedFile};

/// Extraction failures. The display strings are sent to the client as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Formato de arquivo não suportado. Use .txt ou .pdf.")]
    UnsupportedFormat,

    #[error("Erro ao ler o arquivo TXT: {0}")]
    Decode(String),

    #[error("Erro ao ler o arquivo PDF. Garanta que é um PDF baseado em texto: {0}")]
    PdfParse(String),
}

/// Extract the plain text of an email input.
///
/// Raw text is returned verbatim. Files are dispatched on their suffix:
/// `.txt` is decoded as UTF-8, `.pdf` is parsed page by page with each
/// page's text followed by a newline.
pub fn extract_text(input: &EmailInput) -> Result<String, ExtractionError> {
    match input {
        EmailInput::RawText(text) => Ok(text.clone()),
        EmailInput::File(file) => extract_file(file),
    }
}

fn extract_file(file: &UploadedFile) -> Result<String, ExtractionError> {
    match file.file_type() {
        FileType::PlainText => decode_utf8(&file.bytes),
        FileType::Pdf => extract_pdf(&file.bytes),
        FileType::Unsupported => Err(ExtractionError::UnsupportedFormat),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ExtractionError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ExtractionError::Decode(e.to_string()))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed documents instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionError::PdfParse("documento PDF inválido".into()))?
        .map_err(|e| ExtractionError::PdfParse(e.to_string()))?;

    debug!("Extracted {} PDF page(s) from {} bytes", pages.len(), bytes.len());

    join_pages(&pages)
}

/// Join page texts, each followed by a newline. Fails when no page has any
/// text layer.
fn join_pages<S: AsRef<str>>(pages: &[S]) -> Result<String, ExtractionError> {
    if pages.iter().all(|p| p.as_ref().trim().is_empty()) {
        return Err(ExtractionError::PdfParse(
            "nenhum texto extraível encontrado no documento".into(),
        ));
    }

    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    Ok(text)
}
