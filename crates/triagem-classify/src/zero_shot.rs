//! Zero-shot model classification with a keyword override.
//!
//! The override list is checked first and wins over the model. Model
//! inference is blocking and runs on the blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use triagem_core::{category, ClassificationResult};
use triagem_infer::ZeroShotBackend;

use crate::prompts::zero_shot_prompt;
use crate::Classifier;

/// Phrases that short-circuit to "Improdutivo" without consulting the model.
pub const OVERRIDE_KEYWORDS: &[&str] = &[
    "obrigado",
    "obrigada",
    "agradeço",
    "parabéns",
    "feliz natal",
    "feliz ano novo",
    "bom final de semana",
];

pub const REPLY_PRODUCTIVE: &str = "Olá! Recebemos sua solicitação e ela já está em processamento. Nossa equipe retornará com uma atualização em até 48 horas úteis.";
pub const REPLY_UNPRODUCTIVE: &str = "Olá! Agradecemos sua mensagem. Não há nenhuma ação pendente da nossa parte, mas seguimos à disposição caso precise de algo.";
pub const REPLY_CONFIG_ERROR: &str = "O modelo de classificação não está disponível no servidor. Verifique a configuração e tente novamente.";
pub const REPLY_CLASSIFICATION_ERROR: &str = "Ocorreu um erro ao classificar o e-mail. Por favor, tente novamente.";

pub struct ZeroShotClassifier {
    backend: Arc<dyn ZeroShotBackend>,
}

impl ZeroShotClassifier {
    pub fn new(backend: Arc<dyn ZeroShotBackend>) -> Self {
        Self { backend }
    }

    /// Override keyword found in `text`, compared case-insensitively.
    pub fn override_match(text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        OVERRIDE_KEYWORDS
            .iter()
            .copied()
            .find(|kw| lowered.contains(kw))
    }
}

fn reply_for(label: &str) -> &'static str {
    if label == category::PRODUCTIVE {
        REPLY_PRODUCTIVE
    } else {
        REPLY_UNPRODUCTIVE
    }
}

#[async_trait]
impl Classifier for ZeroShotClassifier {
    fn name(&self) -> &'static str {
        "zero-shot"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        if let Some(kw) = Self::override_match(text) {
            debug!("Override keyword '{}' matched", kw);
            return ClassificationResult::new(category::UNPRODUCTIVE, REPLY_UNPRODUCTIVE);
        }

        if !self.backend.is_available() {
            return ClassificationResult::new(category::CONFIG_ERROR, REPLY_CONFIG_ERROR);
        }

        let backend = Arc::clone(&self.backend);
        let premise = zero_shot_prompt(text);
        let outcome =
            tokio::task::spawn_blocking(move || backend.classify(&premise, &category::CANDIDATES))
                .await;

        let top = match outcome {
            Ok(Ok(scores)) => scores.into_iter().next(),
            Ok(Err(e)) => {
                warn!("Zero-shot classification failed: {}", e);
                None
            }
            Err(e) => {
                warn!("Zero-shot task failed: {}", e);
                None
            }
        };

        match top {
            Some(best) => {
                debug!("Zero-shot top label {} ({:.3})", best.label, best.score);
                let reply = reply_for(&best.label);
                ClassificationResult::new(best.label, reply)
            }
            None => ClassificationResult::new(
                category::CLASSIFICATION_ERROR,
                REPLY_CLASSIFICATION_ERROR,
            ),
        }
    }
}
