//! NLI model metadata and label scoring shared by zero-shot backends.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use triagem_core::{Error, Result};

use crate::zero_shot::LabelScore;

/// Hypothesis sentence paired with the email text for each candidate label.
pub const HYPOTHESIS_TEMPLATE: &str = "Este e-mail é {}.";

pub fn hypothesis_for(label: &str) -> String {
    HYPOTHESIS_TEMPLATE.replace("{}", label)
}

/// Output layout of an NLI model, from its HuggingFace `config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NliConfig {
    pub entailment_index: usize,
    /// Whether the encoder expects a `token_type_ids` input.
    pub uses_token_type_ids: bool,
}

impl Default for NliConfig {
    /// MNLI ordering: contradiction, neutral, entailment.
    fn default() -> Self {
        Self {
            entailment_index: 2,
            uses_token_type_ids: false,
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    label2id: HashMap<String, usize>,
    #[serde(default)]
    model_type: Option<String>,
}

impl NliConfig {
    /// Load `config.json` from a model directory, falling back to defaults
    /// when the file is absent.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let path = model_dir.join("config.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        let defaults = Self::default();

        let find = |needle: &str| {
            raw.label2id
                .iter()
                .find(|(name, _)| name.to_lowercase().starts_with(needle))
                .map(|(_, &idx)| idx)
        };

        let entailment_index = find("entail").unwrap_or(defaults.entailment_index);
        if find("contradict") == Some(entailment_index) {
            return Err(Error::Config(
                "NLI config maps entailment and contradiction to the same index".into(),
            ));
        }

        let uses_token_type_ids = matches!(
            raw.model_type.as_deref(),
            Some("bert") | Some("albert") | Some("mobilebert")
        );

        Ok(Self {
            entailment_index,
            uses_token_type_ids,
        })
    }
}

/// Softmax the entailment logits across labels and sort highest first.
pub fn rank_labels(labels: &[&str], entailment_logits: &[f32]) -> Vec<LabelScore> {
    let max = entailment_logits
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = entailment_logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    let mut scores: Vec<LabelScore> = labels
        .iter()
        .zip(exps)
        .map(|(label, e)| LabelScore {
            label: label.to_string(),
            score: if sum > 0.0 { e / sum } else { 0.0 },
        })
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
