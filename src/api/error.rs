use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;

pub const QUERY_EXTRACTION_FAILED: &str = "Query extraction failed.";

/// Errors a chat request can end with. Each renders as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The question could not be turned into a structured query.
    #[error("Query extraction failed.")]
    QueryExtraction,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::QueryExtraction | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => {
                error!("chat request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failure_is_client_error() {
        let resp = AppError::QueryExtraction.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::QueryExtraction.to_string(), "Query extraction failed.");
    }

    #[test]
    fn store_failure_is_server_error_with_message() {
        let err = AppError::from(sea_orm::DbErr::Custom("disk full".to_string()));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
