//! Classification through an external LLM.
//!
//! The provider's `category` is passed through as returned; it is not
//! checked against the expected labels. Any failure becomes an
//! `"Erro - API"` result.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use triagem_core::{category, ClassificationResult};
use triagem_llm::{complete_json, ChatMessage, CompletionRequest, LLMConfig, LlmError};

use crate::prompts::{llm_prompt, LLM_SYSTEM};
use crate::Classifier;

pub const REPLY_API_ERROR: &str =
    "Desculpe, não foi possível classificar o e-mail no momento. Tente novamente mais tarde.";

const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: usize = 512;

#[derive(Debug, Deserialize)]
struct Verdict {
    category: String,
    suggested_reply: String,
}

pub struct LlmClassifier {
    client: Client,
    config: LLMConfig,
}

impl LlmClassifier {
    pub fn new(client: Client, config: LLMConfig) -> Self {
        Self { client, config }
    }

    async fn request_verdict(&self, text: &str) -> Result<Verdict, LlmError> {
        let resolved = self
            .config
            .resolve_provider()
            .ok_or(LlmError::NotConfigured)?;
        debug!("Classifying with {} ({})", resolved.provider, resolved.model);

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(LLM_SYSTEM),
                ChatMessage::user(llm_prompt(text)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let value = complete_json(&self.client, &resolved, &request).await?;
        serde_json::from_value(value)
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        match self.request_verdict(text).await {
            Ok(verdict) => ClassificationResult::new(verdict.category, verdict.suggested_reply),
            Err(e) => {
                warn!("LLM classification failed: {}", e);
                ClassificationResult::new(category::API_ERROR, REPLY_API_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn openai_reply(content: &'static str) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move |Json(_body): Json<Value>| async move {
                Json(json!({"choices": [{"message": {"content": content}}]}))
            }),
        )
    }

    fn config_for(base_url: String) -> LLMConfig {
        LLMConfig {
            openai_api_key: Some("test-key".into()),
            base_url: Some(base_url),
            ..LLMConfig::default()
        }
    }

    #[tokio::test]
    async fn test_passes_provider_verdict_through() {
        let base = spawn_stub(openai_reply(
            r#"{"category": "Produtivo", "suggested_reply": "Vamos verificar seu boleto."}"#,
        ))
        .await;
        let classifier = LlmClassifier::new(Client::new(), config_for(base));

        let result = classifier.classify("problema com boleto").await;
        assert_eq!(result.category, "Produtivo");
        assert_eq!(result.suggested_reply, "Vamos verificar seu boleto.");
    }

    #[tokio::test]
    async fn test_unexpected_category_is_not_clamped() {
        let base = spawn_stub(openai_reply(
            r#"{"category": "Urgente", "suggested_reply": "Já estamos nisso."}"#,
        ))
        .await;
        let classifier = LlmClassifier::new(Client::new(), config_for(base));

        assert_eq!(classifier.classify("socorro").await.category, "Urgente");
    }

    #[tokio::test]
    async fn test_malformed_json_is_api_error() {
        let base = spawn_stub(openai_reply("isto não é json")).await;
        let classifier = LlmClassifier::new(Client::new(), config_for(base));

        let result = classifier.classify("qualquer coisa").await;
        assert_eq!(result.category, "Erro - API");
        assert_eq!(result.suggested_reply, REPLY_API_ERROR);
    }

    #[tokio::test]
    async fn test_missing_field_is_api_error() {
        let base = spawn_stub(openai_reply(r#"{"category": "Produtivo"}"#)).await;
        let classifier = LlmClassifier::new(Client::new(), config_for(base));

        assert_eq!(classifier.classify("texto").await.category, "Erro - API");
    }

    #[tokio::test]
    async fn test_provider_error_status_is_api_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_stub(router).await;
        let classifier = LlmClassifier::new(Client::new(), config_for(base));

        assert_eq!(classifier.classify("texto").await.category, "Erro - API");
    }

    #[tokio::test]
    async fn test_missing_credential_is_api_error() {
        let classifier = LlmClassifier::new(Client::new(), LLMConfig::default());
        let result = classifier.classify("preciso de ajuda").await;
        assert_eq!(result.category, "Erro - API");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_api_error() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let classifier =
            LlmClassifier::new(Client::new(), config_for("http://127.0.0.1:9/v1".into()));
        assert_eq!(classifier.classify("texto").await.category, "Erro - API");
    }
}
