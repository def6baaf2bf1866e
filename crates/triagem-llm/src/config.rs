//! LLM credentials and provider selection, read from the environment.

use serde::{Deserialize, Serialize};

use crate::types::LLMProvider;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// LLM configuration. API keys are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub preferred_provider: String,
    #[serde(skip)]
    pub openai_api_key: Option<String>,
    #[serde(skip)]
    pub anthropic_api_key: Option<String>,
    #[serde(skip)]
    pub groq_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_model: String,
    pub groq_model: String,
    /// Overrides the resolved provider's model.
    pub model_override: Option<String>,
    /// Overrides the resolved provider's base URL.
    pub base_url: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.into(),
            groq_model: DEFAULT_GROQ_MODEL.into(),
            model_override: None,
            base_url: None,
        }
    }
}

/// Provider, model and credential picked for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub provider: LLMProvider,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl LLMConfig {
    /// Load config from env vars and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            preferred_provider: non_empty("TRIAGEM_LLM_PROVIDER")
                .map(|p| p.trim().to_lowercase())
                .unwrap_or_else(|| "auto".into()),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            groq_api_key: non_empty("GROQ_API_KEY"),
            model_override: non_empty("TRIAGEM_LLM_MODEL"),
            base_url: non_empty("TRIAGEM_LLM_BASE_URL"),
            ..Self::default()
        }
    }

    /// Resolve which provider and model to use.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        let (provider, model, key) = self.resolve_inner()?;
        Some(ResolvedProvider {
            provider,
            model: self.model_override.clone().unwrap_or(model),
            api_key: key,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn resolve_inner(&self) -> Option<(LLMProvider, String, String)> {
        // Explicit preference
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "openai" => self.credentials(LLMProvider::OpenAI),
                "anthropic" => self.credentials(LLMProvider::Anthropic),
                "groq" => self.credentials(LLMProvider::Groq),
                _ => None,
            };
        }

        // Auto mode: OpenAI > Groq > Anthropic
        [LLMProvider::OpenAI, LLMProvider::Groq, LLMProvider::Anthropic]
            .into_iter()
            .find_map(|provider| self.credentials(provider))
    }

    /// Provider, model and key, when that provider's key is set.
    fn credentials(&self, provider: LLMProvider) -> Option<(LLMProvider, String, String)> {
        let (key, model) = match provider {
            LLMProvider::OpenAI => (&self.openai_api_key, &self.openai_model),
            LLMProvider::Anthropic => (&self.anthropic_api_key, &self.anthropic_model),
            LLMProvider::Groq => (&self.groq_api_key, &self.groq_model),
        };
        key.as_ref().map(|k| (provider, model.clone(), k.clone()))
    }
}
