//! Extract → normalize → classify, shared by the HTTP handler and the CLI.

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{info, warn};
use triagem_core::ClassificationResult;
use triagem_ingest::{extract_text, EmailInput, ExtractionError};

use crate::state::AppState;

pub const EMPTY_CONTENT_MESSAGE: &str =
    "Por favor, insira o conteúdo de um e-mail ou faça upload de um arquivo.";

/// Request failures. Classification failures never show up here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("{}", EMPTY_CONTENT_MESSAGE)]
    EmptyContent,

    #[error("Erro interno ao processar o arquivo.")]
    Task(#[from] tokio::task::JoinError),
}

impl PipelineError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Extraction(_) | Self::EmptyContent => StatusCode::BAD_REQUEST,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Run the full pipeline for one email.
///
/// File parsing runs on the blocking pool. Emptiness is checked on the
/// extracted text before normalization, so whitespace-only content still
/// reaches the classifier.
pub async fn run(
    state: &AppState,
    input: EmailInput,
) -> Result<ClassificationResult, PipelineError> {
    let source = input.source();
    let content = match input {
        EmailInput::RawText(text) => text,
        file @ EmailInput::File(_) => {
            tokio::task::spawn_blocking(move || extract_text(&file)).await??
        }
    };
    if content.is_empty() {
        return Err(PipelineError::EmptyContent);
    }

    let cleaned = state.preprocessor.apply(&content);
    let result = state.classifier.classify(&cleaned).await;

    if result.is_error() {
        warn!(
            "Classification failed: strategy={}, source={}, category={}",
            state.classifier.name(),
            source,
            result.category
        );
    } else {
        info!(
            "Classified email: strategy={}, source={}, category={}",
            state.classifier.name(),
            source,
            result.category
        );
    }

    Ok(result)
}
