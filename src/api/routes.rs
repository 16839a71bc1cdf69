use crate::api::error::{AppError, AppResult};
use crate::api::state::AppState;
use crate::query::{RainfallFilter, StructuredQuery};
use crate::storage::entity::rainfall_record::Model as RainfallModel;
use crate::storage::repository::RainfallRepository;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub structured_query: StructuredQuery,
    pub data: Vec<RainfallModel>,
    pub answer: String,
}

/// POST /api/chat
///
/// Translate, query, then answer. A failed translation stops before the
/// store is touched.
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatMessage>, JsonRejection>,
) -> AppResult<Json<ChatReply>> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let structured = state
        .translator
        .translate(&body.message)
        .await
        .map_err(|_| AppError::QueryExtraction)?;

    let filter = RainfallFilter::from_field_map(&structured.to_field_map());
    let data = RainfallRepository::find_by_filter(&state.db, &filter).await?;
    info!(
        "chat query on {:?} matched {} records",
        filter.fields().map(|f| f.as_str()).collect::<Vec<_>>(),
        data.len()
    );

    let answer = state.synthesizer.synthesize(&body.message, &data).await;

    Ok(Json(ChatReply {
        structured_query: structured,
        data,
        answer,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.db.ping().await.is_ok();
    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
}
