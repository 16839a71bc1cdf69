pub mod gemini;
pub mod openrouter;
pub mod types;
pub mod unified;

pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;
pub use types::{ChatRequest, ChatResponse, LlmError, LlmProvider};
pub use unified::AnyProvider;

use reqwest::{Response, StatusCode};
use serde_json::Value;

pub(crate) fn build_llm_http_client() -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();

    if let Ok(raw) = std::env::var("LLM_PROXY") {
        let t = raw.trim();
        if !t.is_empty() {
            let url = if t.contains("://") {
                t.to_string()
            } else {
                format!("socks5h://{}", t)
            };
            let proxy = reqwest::Proxy::all(&url).map_err(|e| LlmError::Http(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
    }

    builder.build().map_err(|e| LlmError::Http(e.to_string()))
}

/// Splits a key list such as `OPENROUTER_API_KEYS="k1, k2;k3"`.
pub(crate) fn split_keys(raw: &str) -> Vec<String> {
    raw.split(|c| c == ',' || c == ';' || c == '\n' || c == '\t' || c == ' ')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Maps the HTTP status of a provider reply and returns its body.
pub(crate) async fn read_body(resp: Response) -> Result<String, LlmError> {
    match resp.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(LlmError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
        _ => {}
    }

    let status = resp.status();
    let raw = resp
        .text()
        .await
        .map_err(|e| LlmError::Http(e.to_string()))?;

    if !status.is_success() {
        return Err(LlmError::Http(format!("{} {}", status.as_u16(), raw)));
    }
    Ok(raw)
}

/// Joins a content value that is either a plain string or an array of parts
/// carrying `text`.
pub(crate) fn join_text_parts(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(arr) => {
            let mut parts = Vec::new();
            for it in arr {
                if let Some(t) = it.get("text").and_then(|x| x.as_str()) {
                    parts.push(t.to_string());
                } else if let Some(t) = it.as_str() {
                    parts.push(t.to_string());
                }
            }
            Some(parts.join("\n"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_keys_accepts_mixed_separators() {
        assert_eq!(split_keys("a, b;c\n d"), vec!["a", "b", "c", "d"]);
        assert!(split_keys("  ").is_empty());
    }

    #[test]
    fn join_text_parts_handles_strings_and_arrays() {
        assert_eq!(join_text_parts(&json!("hi")).as_deref(), Some("hi"));
        assert_eq!(
            join_text_parts(&json!([{"text": "a"}, "b"])).as_deref(),
            Some("a\nb")
        );
        assert!(join_text_parts(&json!(42)).is_none());
    }
}
