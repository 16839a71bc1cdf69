use crate::ai::types::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use crate::ai::{build_llm_http_client, join_text_parts, read_body};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Google Generative Language `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| LlmError::MissingEnv("GEMINI_API_KEY"))?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());
        Ok(Self {
            client: build_llm_http_client()?,
            api_key,
            base_url,
        })
    }
}

pub(crate) fn request_body(req: &ChatRequest) -> Value {
    let mut generation = Map::new();
    generation.insert("temperature".to_string(), serde_json::json!(req.temperature));
    if let Some(max) = req.max_tokens {
        generation.insert("maxOutputTokens".to_string(), serde_json::json!(max));
    }
    if let Some(schema) = &req.response_schema {
        generation.insert(
            "responseMimeType".to_string(),
            Value::String("application/json".to_string()),
        );
        generation.insert("responseSchema".to_string(), to_gemini_schema(schema));
    }

    let mut body = serde_json::json!({
        "contents": [
            {"role": "user", "parts": [{"text": req.user}]}
        ],
        "generationConfig": Value::Object(generation),
    });
    if !req.system.is_empty() {
        body["systemInstruction"] = serde_json::json!({"parts": [{"text": req.system}]});
    }
    body
}

/// Gemini's schema dialect spells types in upper case (`OBJECT`, `STRING`).
pub(crate) fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                let v = match (k.as_str(), v) {
                    ("type", Value::String(t)) => Value::String(t.to_ascii_uppercase()),
                    _ => to_gemini_schema(v),
                };
                out.insert(k.clone(), v);
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

pub(crate) fn extract_text(raw: &str) -> Result<String, LlmError> {
    let v: Value = serde_json::from_str(raw)
        .map_err(|e| LlmError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))?;

    let candidate = v
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| LlmError::InvalidResponse(format!("missing candidates[0], raw={raw}")))?;

    // 输出被截断时 content 里没有 parts
    let finish = candidate
        .get("finishReason")
        .and_then(|f| f.as_str())
        .unwrap_or("UNKNOWN");

    candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(join_text_parts)
        .ok_or_else(|| {
            LlmError::InvalidResponse(format!(
                "missing content.parts in candidates[0] (finishReason={finish}), raw={raw}"
            ))
        })
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            req.model
        );
        let body = request_body(&req);

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_types_are_upper_cased_recursively() {
        let schema = json!({
            "type": "object",
            "properties": {
                "filters": {"type": "array", "items": {"type": "string"}}
            }
        });
        let out = to_gemini_schema(&schema);
        assert_eq!(out["type"], "OBJECT");
        assert_eq!(out["properties"]["filters"]["type"], "ARRAY");
        assert_eq!(out["properties"]["filters"]["items"]["type"], "STRING");
    }

    #[test]
    fn body_requests_json_when_schema_present() {
        let req = ChatRequest {
            model: "gemini-2.5-flash".to_string(),
            system: String::new(),
            user: "q".to_string(),
            temperature: 0.0,
            max_tokens: None,
            response_schema: Some(json!({"type": "object"})),
        };
        let body = request_body(&req);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(body.get("systemInstruction").is_none());
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn explicit_output_cap_is_forwarded() {
        let req = ChatRequest {
            model: "gemini-2.5-flash".to_string(),
            system: "sys".to_string(),
            user: "q".to_string(),
            temperature: 0.4,
            max_tokens: Some(256),
            response_schema: None,
        };
        let body = request_body(&req);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
    }

    #[test]
    fn truncated_candidate_reports_finish_reason() {
        let raw = r#"{"candidates":[{"content":{"role":"model"},"finishReason":"MAX_TOKENS"}]}"#;
        match extract_text(raw) {
            Err(LlmError::InvalidResponse(msg)) => assert!(msg.contains("MAX_TOKENS")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn joins_candidate_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        assert_eq!(extract_text(raw).unwrap(), "a\nb");
    }

    #[test]
    fn blocked_prompt_has_no_candidates() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert!(matches!(
            extract_text(raw),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
