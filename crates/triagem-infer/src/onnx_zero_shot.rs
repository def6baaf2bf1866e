//! ONNX-based zero-shot classification using an NLI cross-encoder.
//!
//! Each candidate label becomes a hypothesis paired with the email text;
//! the entailment logits are compared across labels. Requires the `onnx`
//! feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::{debug, info};
    use triagem_core::{Error, Result};

    use crate::nli::{hypothesis_for, rank_labels, NliConfig};
    use crate::zero_shot::{LabelScore, ZeroShotBackend};

    /// Maximum sequence length for the model.
    const MAX_SEQ_LEN: usize = 512;

    /// ONNX zero-shot engine.
    pub struct OnnxZeroShot {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        nli: NliConfig,
    }

    impl OnnxZeroShot {
        /// Load an ONNX NLI model and tokenizer from the given directory.
        ///
        /// Expects:
        /// - `model_dir/model.onnx` — the ONNX model file
        /// - `model_dir/tokenizer.json` — the HuggingFace tokenizer
        /// - `model_dir/config.json` — optional, for the label order
        pub fn load(model_dir: &Path) -> Result<Self> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(Error::Config(format!(
                    "Model not found: {}",
                    model_path.display()
                )));
            }
            if !tokenizer_path.exists() {
                return Err(Error::Config(format!(
                    "Tokenizer not found: {}",
                    tokenizer_path.display()
                )));
            }

            let nli = NliConfig::load(model_dir)?;

            // With load-dynamic feature, ORT_DYLIB_PATH env var must point to libonnxruntime.so
            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| Error::Inference(format!("Failed to create session builder: {}", e)))?
                .with_intra_threads(2)
                .map_err(|e| Error::Inference(format!("Failed to set threads: {}", e)))?
                .commit_from_file(&model_path)
                .map_err(|e| Error::Inference(format!("Failed to load ONNX model: {}", e)))?;

            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| Error::Inference(format!("Failed to load tokenizer: {}", e)))?;

            info!(
                "ONNX zero-shot model loaded: model={}, entailment_index={}",
                model_path.display(),
                nli.entailment_index
            );

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                nli,
            })
        }

        /// Entailment logit for one premise/hypothesis pair.
        fn entailment_logit(&self, premise: &str, hypothesis: &str) -> Result<f32> {
            let encoding = self
                .tokenizer
                .encode((premise, hypothesis), true)
                .map_err(|e| Error::Inference(format!("Tokenization failed: {}", e)))?;

            // Truncate to max sequence length
            let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);
            let ids_data: Vec<i64> = encoding.get_ids()[..seq_len]
                .iter()
                .map(|&id| id as i64)
                .collect();
            let mask_data: Vec<i64> = encoding.get_attention_mask()[..seq_len]
                .iter()
                .map(|&m| m as i64)
                .collect();

            let ids_tensor = Tensor::from_array(([1usize, seq_len], ids_data))
                .map_err(|e| Error::Inference(format!("Failed to create ids tensor: {}", e)))?;
            let mask_tensor = Tensor::from_array(([1usize, seq_len], mask_data))
                .map_err(|e| Error::Inference(format!("Failed to create mask tensor: {}", e)))?;

            let mut session = self.session.lock();
            let run_result = if self.nli.uses_token_type_ids {
                let type_ids_data: Vec<i64> = encoding.get_type_ids()[..seq_len]
                    .iter()
                    .map(|&t| t as i64)
                    .collect();
                let type_ids_tensor = Tensor::from_array(([1usize, seq_len], type_ids_data))
                    .map_err(|e| {
                        Error::Inference(format!("Failed to create type_ids tensor: {}", e))
                    })?;
                session.run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
            } else {
                session.run(ort::inputs![ids_tensor, mask_tensor])
            };
            let outputs = run_result
                .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            // Logits [1, num_nli_labels]
            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("Failed to extract logits: {}", e)))?;

            data.get(self.nli.entailment_index)
                .copied()
                .ok_or_else(|| {
                    Error::Inference(format!(
                        "Model output has no entailment index {}",
                        self.nli.entailment_index
                    ))
                })
        }
    }

    impl ZeroShotBackend for OnnxZeroShot {
        fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>> {
            if labels.is_empty() {
                return Err(Error::Inference("no candidate labels".into()));
            }

            let logits = labels
                .iter()
                .map(|label| self.entailment_logit(text, &hypothesis_for(label)))
                .collect::<Result<Vec<f32>>>()?;

            let ranked = rank_labels(labels, &logits);
            debug!("Zero-shot ranking: {:?}", ranked);
            Ok(ranked)
        }

        fn is_available(&self) -> bool {
            true
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxZeroShot;
