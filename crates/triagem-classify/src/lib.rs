//! Triagem Classify — maps normalized email text to a category and a
//! suggested reply.
//!
//! Three interchangeable strategies sit behind the [`Classifier`] trait:
//! keyword rules, an external LLM, and a zero-shot model guarded by a
//! keyword override. Strategy failures never escape `classify`; they are
//! turned into sentinel categories so callers always get a well-formed
//! result.

pub mod keywords;
pub mod llm;
pub mod prompts;
pub mod zero_shot;

use std::sync::Arc;

use async_trait::async_trait;
use triagem_core::{ClassificationResult, Strategy, TriagemConfig};
use triagem_llm::LLMConfig;

pub use keywords::{KeywordClassifier, KeywordMatch, KeywordRules};
pub use llm::LlmClassifier;
pub use zero_shot::ZeroShotClassifier;

/// Classification capability shared by every strategy.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Strategy name for logs and `/health`.
    fn name(&self) -> &'static str;

    /// Classify normalized text. Never fails.
    async fn classify(&self, text: &str) -> ClassificationResult;
}

/// Build the classifier selected by configuration.
///
/// The HTTP client and the zero-shot model are created here once and
/// shared read-only by every request.
pub fn build_classifier(config: &TriagemConfig, llm_config: LLMConfig) -> Arc<dyn Classifier> {
    match config.strategy {
        Strategy::Keywords => Arc::new(KeywordClassifier::default()),
        Strategy::Llm => {
            if llm_config.resolve_provider().is_none() {
                tracing::warn!(
                    "No LLM API key configured; classifications will report an API error"
                );
            }
            Arc::new(LlmClassifier::new(reqwest::Client::new(), llm_config))
        }
        Strategy::ZeroShot => {
            let backend = triagem_infer::create_zero_shot(&config.model_dir);
            Arc::new(ZeroShotClassifier::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(config: &TriagemConfig) -> &'static str {
        build_classifier(config, LLMConfig::default()).name()
    }

    #[test]
    fn test_build_selects_strategy() {
        let mut config = TriagemConfig::default();
        assert_eq!(name(&config), "keywords");

        config.strategy = Strategy::Llm;
        assert_eq!(name(&config), "llm");

        config.strategy = Strategy::ZeroShot;
        config.model_dir = std::path::PathBuf::from("/nonexistent/model");
        assert_eq!(name(&config), "zero-shot");
    }
}
