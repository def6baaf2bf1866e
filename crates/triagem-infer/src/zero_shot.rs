//! Zero-shot classification backend trait and fallback.
//!
//! The `ZeroShotBackend` trait abstracts over label ranking.
//! Implementations:
//! - `OnnxZeroShot`: ONNX Runtime with an NLI model (requires the `onnx` feature)
//! - `UnavailableZeroShot`: reports that no model is loaded

use serde::{Deserialize, Serialize};
use triagem_core::{Error, Result};

/// Score for a single candidate label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Trait for zero-shot classification backends.
pub trait ZeroShotBackend: Send + Sync {
    /// Rank `labels` for `text`. Scores are sorted highest first.
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>>;

    /// Check if the backend is available (model loaded).
    fn is_available(&self) -> bool;
}

/// Backend used when no model could be loaded at startup.
pub struct UnavailableZeroShot {
    reason: String,
}

impl UnavailableZeroShot {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ZeroShotBackend for UnavailableZeroShot {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<LabelScore>> {
        Err(Error::Inference(format!(
            "zero-shot model not loaded: {}",
            self.reason
        )))
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_backend() {
        let backend = UnavailableZeroShot::new("feature disabled");
        assert!(!backend.is_available());
        let err = backend.classify("texto", &["Produtivo"]).unwrap_err();
        assert!(err.to_string().contains("feature disabled"));
    }
}
