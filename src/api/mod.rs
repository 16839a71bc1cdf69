pub mod error;
pub mod routes;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use log::warn;
use tower_http::cors::CorsLayer;

/// Any origin when `origins` is empty, otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("ignoring invalid CORS origin {:?}: {}", o, e);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    routes::routes()
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
