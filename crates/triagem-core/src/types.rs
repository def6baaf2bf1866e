//! Classification result and category names shared by every strategy.

use serde::{Deserialize, Serialize};

/// Category labels returned to the client.
pub mod category {
    pub const PRODUCTIVE: &str = "Produtivo";
    pub const UNPRODUCTIVE: &str = "Improdutivo";
    pub const PRODUCTIVE_DEFAULT: &str = "Produtivo (Padrão)";

    /// External LLM call failed.
    pub const API_ERROR: &str = "Erro - API";
    /// Zero-shot model was not loaded at startup.
    pub const CONFIG_ERROR: &str = "Erro de Configuração";
    /// Zero-shot model call failed.
    pub const CLASSIFICATION_ERROR: &str = "Erro de Classificação";

    /// Candidate labels offered to model-based strategies.
    pub const CANDIDATES: [&str; 2] = [PRODUCTIVE, UNPRODUCTIVE];

    /// Whether a category is one of the sentinel error markers.
    pub fn is_error(category: &str) -> bool {
        matches!(category, API_ERROR | CONFIG_ERROR | CLASSIFICATION_ERROR)
    }
}

/// Category plus suggested reply, serialized with the field names the
/// front-end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "resposta_sugerida")]
    pub suggested_reply: String,
}

impl ClassificationResult {
    pub fn new(category: impl Into<String>, suggested_reply: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            suggested_reply: suggested_reply.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        category::is_error(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let result = ClassificationResult::new(category::PRODUCTIVE, "ok");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["categoria"], "Produtivo");
        assert_eq!(json["resposta_sugerida"], "ok");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_error_categories() {
        assert!(ClassificationResult::new(category::API_ERROR, "").is_error());
        assert!(ClassificationResult::new(category::CONFIG_ERROR, "").is_error());
        let fallback = ClassificationResult::new(category::PRODUCTIVE_DEFAULT, "");
        assert!(!fallback.is_error());
    }
}
