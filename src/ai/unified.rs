use crate::ai::types::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use crate::ai::{GeminiProvider, OpenRouterProvider};
use async_trait::async_trait;

#[derive(Clone)]
pub enum InnerProvider {
    Gemini(GeminiProvider),
    OpenRouter(OpenRouterProvider),
}

/// Provider picked by `LLM_PROVIDER` (gemini when unset).
#[derive(Clone)]
pub struct AnyProvider {
    inner: InnerProvider,
}

impl AnyProvider {
    pub fn from_env() -> Result<Self, LlmError> {
        let which = std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .to_lowercase();
        match which.as_str() {
            "openrouter" => {
                let p = OpenRouterProvider::from_env()?;
                Ok(Self {
                    inner: InnerProvider::OpenRouter(p),
                })
            }
            _ => {
                let p = GeminiProvider::from_env()?;
                Ok(Self {
                    inner: InnerProvider::Gemini(p),
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match &self.inner {
            InnerProvider::Gemini(_) => "gemini",
            InnerProvider::OpenRouter(_) => "openrouter",
        }
    }
}

#[async_trait]
impl LlmProvider for AnyProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            InnerProvider::Gemini(p) => p.chat(req).await,
            InnerProvider::OpenRouter(p) => p.chat(req).await,
        }
    }
}
