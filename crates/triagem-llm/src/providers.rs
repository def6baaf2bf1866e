//! Provider request implementations.
//!
//! OpenAI and Groq share the chat-completions format and support JSON mode.
//! Anthropic uses the Messages API; the JSON object is pulled out of the
//! returned text.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ResolvedProvider;
use crate::types::{CompletionRequest, LLMProvider, LlmError};

static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Run one completion and return the JSON object the model produced.
pub async fn complete_json(
    client: &Client,
    resolved: &ResolvedProvider,
    request: &CompletionRequest,
) -> Result<Value, LlmError> {
    let text = match resolved.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => {
            complete_openai_compat(client, resolved, request).await?
        }
        LLMProvider::Anthropic => complete_anthropic(client, resolved, request).await?,
    };
    parse_json_object(&text)
}

/// Non-streaming call to an OpenAI-compatible API (OpenAI, Groq).
async fn complete_openai_compat(
    client: &Client,
    resolved: &ResolvedProvider,
    request: &CompletionRequest,
) -> Result<String, LlmError> {
    let url = format!("{}/chat/completions", resolved.base_url);
    let msgs: Vec<Value> = request
        .messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let body = json!({
        "model": resolved.model,
        "messages": msgs,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
        "response_format": {"type": "json_object"},
    });

    debug!("Requesting completion from {} with model {}", url, resolved.model);

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", resolved.api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let parsed = read_success_body(response).await?;
    parsed["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".into()))
}

/// Non-streaming call to Anthropic's Messages API.
async fn complete_anthropic(
    client: &Client,
    resolved: &ResolvedProvider,
    request: &CompletionRequest,
) -> Result<String, LlmError> {
    // Separate system message from conversation
    let system_msg: Option<String> = request
        .messages
        .iter()
        .find(|m| m.role == "system")
        .map(|m| m.content.clone());

    let conv_msgs: Vec<Value> = request
        .messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": resolved.model,
        "messages": conv_msgs,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    });
    if let Some(sys) = system_msg {
        body["system"] = json!(sys);
    }

    let url = format!("{}/messages", resolved.base_url);
    debug!("Requesting completion from Anthropic with model {}", resolved.model);

    let response = client
        .post(&url)
        .header("x-api-key", &resolved.api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let parsed = read_success_body(response).await?;
    let text: String = parsed["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse("empty content blocks".into()));
    }
    Ok(text)
}

async fn read_success_body(response: reqwest::Response) -> Result<Value, LlmError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))
}

/// Parse model output as a JSON object, tolerating surrounding prose or
/// markdown fences.
pub fn parse_json_object(text: &str) -> Result<Value, LlmError> {
    let trimmed = text.trim();
    let candidate = match serde_json::from_str::<Value>(trimmed) {
        Ok(v) => v,
        Err(_) => {
            let found = JSON_OBJECT
                .find(trimmed)
                .ok_or_else(|| LlmError::InvalidResponse("no JSON object in output".into()))?;
            serde_json::from_str(found.as_str())
                .map_err(|e| LlmError::InvalidResponse(e.to_string()))?
        }
    };

    if candidate.is_object() {
        Ok(candidate)
    } else {
        Err(LlmError::InvalidResponse("output is not a JSON object".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use axum::routing::post;
    use axum::{Json, Router};

    #[test]
    fn test_parse_plain_object() {
        let v = parse_json_object(r#"{"category": "Produtivo"}"#).unwrap();
        assert_eq!(v["category"], "Produtivo");
    }

    #[test]
    fn test_parse_fenced_object() {
        let text = "Claro!\n```json\n{\"category\": \"Improdutivo\", \"suggested_reply\": \"Ok\"}\n```";
        let v = parse_json_object(text).unwrap();
        assert_eq!(v["category"], "Improdutivo");
        assert_eq!(v["suggested_reply"], "Ok");
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_json_object("[1, 2]").is_err());
        assert!(parse_json_object("not json at all").is_err());
        assert!(parse_json_object("{broken").is_err());
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: 0.0,
            max_tokens: 64,
        }
    }

    #[tokio::test]
    async fn test_openai_compat_round_trip() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["response_format"]["type"], "json_object");
                Json(json!({
                    "choices": [{"message": {"content": "{\"category\": \"Produtivo\"}"}}]
                }))
            }),
        );
        let base_url = spawn_stub(router).await;
        let resolved = ResolvedProvider {
            provider: LLMProvider::OpenAI,
            model: "test".into(),
            api_key: "k".into(),
            base_url,
        };

        let v = complete_json(&Client::new(), &resolved, &request()).await.unwrap();
        assert_eq!(v["category"], "Produtivo");
    }

    #[tokio::test]
    async fn test_anthropic_round_trip() {
        let router = Router::new().route(
            "/messages",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["system"], "sys");
                Json(json!({
                    "content": [{"type": "text", "text": "{\"category\": \"Improdutivo\"}"}]
                }))
            }),
        );
        let base_url = spawn_stub(router).await;
        let resolved = ResolvedProvider {
            provider: LLMProvider::Anthropic,
            model: "test".into(),
            api_key: "k".into(),
            base_url,
        };

        let v = complete_json(&Client::new(), &resolved, &request()).await.unwrap();
        assert_eq!(v["category"], "Improdutivo");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let base_url = spawn_stub(router).await;
        let resolved = ResolvedProvider {
            provider: LLMProvider::Groq,
            model: "test".into(),
            api_key: "k".into(),
            base_url,
        };

        let err = complete_json(&Client::new(), &resolved, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Status { status: 401, .. }));
    }
}
