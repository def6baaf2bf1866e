//! Triagem Infer — zero-shot classification engine and model loading.
//!
//! Provides the `ZeroShotBackend` trait for ranking candidate labels.
//! When the `onnx` feature is enabled and model files are present,
//! `OnnxZeroShot` loads an NLI model. Without it, `UnavailableZeroShot`
//! is used and the zero-shot strategy answers with a configuration error.

pub mod nli;
pub mod onnx_zero_shot;
pub mod zero_shot;

pub use nli::NliConfig;
pub use zero_shot::{LabelScore, UnavailableZeroShot, ZeroShotBackend};

#[cfg(feature = "onnx")]
pub use onnx_zero_shot::OnnxZeroShot;

use std::path::Path;
use std::sync::Arc;

/// Create the best available zero-shot backend for the given model directory.
///
/// Tries ONNX first (if feature enabled and model files present),
/// falls back to UnavailableZeroShot.
pub fn create_zero_shot(model_dir: &Path) -> Arc<dyn ZeroShotBackend> {
    #[cfg(feature = "onnx")]
    let reason = match OnnxZeroShot::load(model_dir) {
        Ok(backend) => {
            tracing::info!("Using ONNX zero-shot model from {}", model_dir.display());
            return Arc::new(backend);
        }
        Err(e) => e.to_string(),
    };

    #[cfg(not(feature = "onnx"))]
    let reason = String::from("built without the onnx feature");

    tracing::warn!(
        "Zero-shot model at {} unavailable: {}",
        model_dir.display(),
        reason
    );
    Arc::new(UnavailableZeroShot::new(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_dir_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let backend = create_zero_shot(&dir.path().join("nope"));
        assert!(!backend.is_available());
    }
}
