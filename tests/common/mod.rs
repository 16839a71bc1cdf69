#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use rainchat::ai::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use rainchat::api::{build_router, AppState};
use rainchat::storage::entity::rainfall_record::Category;
use rainchat::storage::establish_connection;
use rainchat::storage::repository::{NewRainfallRecord, RainfallRepository};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Replies with queued results in order and remembers every request.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, i: usize) -> ChatRequest {
        self.requests.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
        self.requests.lock().unwrap().push(req);
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Http("no scripted reply".to_string())));
        next.map(|text| ChatResponse { text })
    }
}

pub async fn memory_db() -> DatabaseConnection {
    establish_connection("sqlite::memory:").await.unwrap()
}

pub fn district_record(state: &str, district: &str, year: i32, month: u32) -> NewRainfallRecord {
    NewRainfallRecord {
        dataset_id: "district_rainfall".to_string(),
        category: Category::District,
        state: Some(state.to_string()),
        district: Some(district.to_string()),
        basin: None,
        subbasin: None,
        date: Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap(),
        year: year as f64,
        month: month as f64,
        avg_rainfall: 120.5,
        agency_name: Some("IMD".to_string()),
    }
}

pub fn subbasin_record(basin: &str, subbasin: &str, year: i32, month: u32) -> NewRainfallRecord {
    NewRainfallRecord {
        dataset_id: "subbasin_rainfall".to_string(),
        category: Category::SubBasin,
        state: None,
        district: None,
        basin: Some(basin.to_string()),
        subbasin: Some(subbasin.to_string()),
        date: Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap(),
        year: year as f64,
        month: month as f64,
        avg_rainfall: 80.0,
        agency_name: Some("CWC".to_string()),
    }
}

pub async fn seed(db: &DatabaseConnection, records: Vec<NewRainfallRecord>) {
    RainfallRepository::insert_many(db, records).await.unwrap();
}

pub fn app(db: &DatabaseConnection, provider: Arc<ScriptedProvider>) -> Router {
    let state = AppState::new(Arc::new(db.clone()), provider, "test-model".to_string());
    build_router(state, &[])
}

pub async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
