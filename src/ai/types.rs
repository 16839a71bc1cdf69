use async_trait::async_trait;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Output cap. Unset leaves it to the provider.
    pub max_tokens: Option<u32>,
    /// JSON Schema the reply must follow. `None` means free text.
    pub response_schema: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum LlmError {
    #[error("missing env {0}")]
    MissingEnv(&'static str),
    #[error("http error: {0}")]
    Http(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError>;
}
