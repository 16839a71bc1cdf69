use crate::ai::LlmProvider;
use crate::answer::ResponseSynthesizer;
use crate::query::QueryTranslator;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub translator: QueryTranslator,
    pub synthesizer: ResponseSynthesizer,
}

impl AppState {
    /// Translator and synthesizer share one provider and model.
    pub fn new(
        db: Arc<DatabaseConnection>,
        provider: Arc<dyn LlmProvider>,
        model: String,
    ) -> Self {
        Self {
            db,
            translator: QueryTranslator::new(Arc::clone(&provider), model.clone()),
            synthesizer: ResponseSynthesizer::new(provider, model),
        }
    }
}
