use crate::ai::types::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use crate::ai::{build_llm_http_client, join_text_parts, read_body, split_keys};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// OpenAI-compatible chat completions endpoint (OpenRouter by default).
#[derive(Clone)]
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_keys: Vec<String>,
    index: Arc<AtomicUsize>,
}

impl OpenRouterProvider {
    pub fn from_env() -> Result<Self, LlmError> {
        let mut api_keys = std::env::var("OPENROUTER_API_KEYS")
            .map(|s| split_keys(&s))
            .unwrap_or_default();
        if api_keys.is_empty() {
            let key = std::env::var("OPENROUTER_API_KEY")
                .map_err(|_| LlmError::MissingEnv("OPENROUTER_API_KEY"))?;
            api_keys.push(key);
        }
        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        Ok(Self {
            client: build_llm_http_client()?,
            base_url,
            api_keys,
            index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn next_key(&self) -> &str {
        let i = self.index.fetch_add(1, Ordering::Relaxed);
        &self.api_keys[i % self.api_keys.len()]
    }
}

pub(crate) fn request_body(req: &ChatRequest) -> Value {
    let mut body = serde_json::json!({
        "model": req.model,
        "temperature": req.temperature,
        "messages": [
            {"role": "system", "content": req.system},
            {"role": "user", "content": req.user}
        ]
    });
    if let Some(max) = req.max_tokens {
        body["max_tokens"] = serde_json::json!(max);
    }
    if let Some(schema) = &req.response_schema {
        body["response_format"] = serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": "response",
                "strict": false,
                "schema": schema
            }
        });
    }
    body
}

/// Pulls the completion text out of `choices[0]`, accepting `message.content`,
/// `content`, `text`, or a top-level `output_text`.
pub(crate) fn extract_text(raw: &str) -> Result<String, LlmError> {
    let v: Value = serde_json::from_str(raw)
        .map_err(|e| LlmError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))?;

    let choice0 = v
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| LlmError::InvalidResponse(format!("missing choices[0], raw={raw}")))?;

    let content = choice0
        .get("message")
        .and_then(|m| m.get("content"))
        .or_else(|| choice0.get("content"));

    if let Some(content) = content {
        return join_text_parts(content).ok_or_else(|| {
            LlmError::InvalidResponse(format!("unexpected content type, raw={raw}"))
        });
    }
    if let Some(Value::String(s)) = choice0.get("text") {
        return Ok(s.clone());
    }
    if let Some(Value::String(s)) = v.get("output_text") {
        return Ok(s.clone());
    }
    Err(LlmError::InvalidResponse(format!(
        "missing content/text in choices[0], raw={raw}"
    )))
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = request_body(&req);

        let resp = self
            .client
            .post(url)
            .bearer_auth(self.next_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let raw = read_body(resp).await?;
        let text = extract_text(&raw)?;
        Ok(ChatResponse { text })
    }
}
