//! Shared application state.

use std::sync::Arc;

use triagem_classify::{build_classifier, Classifier};
use triagem_core::TriagemConfig;
use triagem_ingest::Preprocessor;
use triagem_llm::LLMConfig;

/// Shared application state accessible from all route handlers.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub config: TriagemConfig,
    pub preprocessor: Preprocessor,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(config: TriagemConfig, classifier: Arc<dyn Classifier>) -> Self {
        let preprocessor = Preprocessor::new(config.case_sensitive);
        Self {
            config,
            preprocessor,
            classifier,
        }
    }

    /// Build state with the classifier selected by `config.strategy`.
    pub fn from_config(config: TriagemConfig, llm_config: LLMConfig) -> Self {
        let classifier = build_classifier(&config, llm_config);
        Self::new(config, classifier)
    }
}
