use crate::ai::{ChatRequest, LlmError, LlmProvider};
use crate::answer::prompt::{build_answer_prompt, SYSTEM_PROMPT};
use crate::storage::entity::rainfall_record::Model as RainfallModel;
use log::error;
use std::sync::Arc;

pub const APOLOGY: &str = "Sorry, I ran into an issue while generating the response.";

/// Writes the natural-language answer for a chat query.
#[derive(Clone)]
pub struct ResponseSynthesizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ResponseSynthesizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }

    /// The model's trimmed answer, or the model failure.
    pub async fn try_synthesize(
        &self,
        user_query: &str,
        records: &[RainfallModel],
    ) -> Result<String, LlmError> {
        let req = ChatRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user: build_answer_prompt(user_query, records),
            temperature: 0.4,
            max_tokens: None,
            response_schema: None,
        };
        let resp = self.provider.chat(req).await?;
        Ok(resp.text.trim().to_string())
    }

    /// Like [`Self::try_synthesize`] but never fails: errors become [`APOLOGY`].
    pub async fn synthesize(&self, user_query: &str, records: &[RainfallModel]) -> String {
        match self.try_synthesize(user_query, records).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error generating AI response: {}", e);
                APOLOGY.to_string()
            }
        }
    }
}
