use crate::ai::{ChatRequest, LlmError, LlmProvider};
use crate::query::parser::parse_structured_query;
use crate::query::prompt::{build_translate_prompt, query_schema, SYSTEM_PROMPT};
use crate::query::structured::StructuredQuery;
use log::{error, info};
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),
    #[error("malformed model output: {0}")]
    Malformed(String),
}

/// Turns a chat message into a [`StructuredQuery`] with the hosted model.
#[derive(Clone)]
pub struct QueryTranslator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl QueryTranslator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }

    pub async fn translate(&self, user_query: &str) -> Result<StructuredQuery, TranslateError> {
        let req = ChatRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user: build_translate_prompt(user_query),
            temperature: 0.0,
            max_tokens: None,
            response_schema: Some(query_schema()),
        };

        let result = match self.provider.chat(req).await {
            Ok(resp) => parse_structured_query(&resp.text)
                .map_err(|e| TranslateError::Malformed(format!("{e}, text={}", resp.text))),
            Err(e) => Err(TranslateError::from(e)),
        };

        match &result {
            Ok(q) => info!(
                "translated query: category={} filters={}",
                q.category.as_str(),
                q.filters.len()
            ),
            Err(e) => error!("Error generating structured query: {}", e),
        }
        result
    }
}
