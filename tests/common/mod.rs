#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use blogforge::api::SuggestionItem;
use blogforge::config::Config;
use blogforge::db::Store;
use blogforge::services::{ArticleGenerator, KeywordResearchProvider, SuggestionError};
use blogforge::state::SharedState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const USER_HEADER: &str = "x-clerk-user-id";

/// Research provider that counts calls and echoes the seeds back.
#[derive(Default)]
pub struct FakeResearch {
    pub calls: AtomicUsize,
}

impl FakeResearch {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl KeywordResearchProvider for FakeResearch {
    async fn keyword_suggestions(
        &self,
        seeds: &[String],
        _language_name: &str,
        _location_code: i32,
        limit: u32,
    ) -> Result<Vec<SuggestionItem>, SuggestionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(seeds
            .iter()
            .take(limit as usize)
            .map(|s| SuggestionItem {
                keyword: format!("{s} tips"),
                search_volume: Some(100),
                cpc: Some(1.5),
                competition: Some("LOW".to_string()),
            })
            .collect())
    }
}

/// Provider that always fails with the given error.
pub struct FailingResearch(pub fn() -> SuggestionError);

#[async_trait::async_trait]
impl KeywordResearchProvider for FailingResearch {
    async fn keyword_suggestions(
        &self,
        _seeds: &[String],
        _language_name: &str,
        _location_code: i32,
        _limit: u32,
    ) -> Result<Vec<SuggestionItem>, SuggestionError> {
        Err((self.0)())
    }
}

/// Generator that returns a canned response and remembers the last prompt.
pub struct FakeGenerator {
    pub response: String,
    pub last_prompt: std::sync::Mutex<Option<String>>,
}

impl FakeGenerator {
    pub fn json() -> Self {
        Self::with_response(
            r##"{"title": "Rust for Bloggers", "content": "# Rust for Bloggers\n\nBody text.", "metaDescription": "Why Rust", "keywords": ["rust", "blog"], "headings": ["Intro"]}"##,
        )
    }

    pub fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ArticleGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.response.is_empty() {
            anyhow::bail!("model unavailable");
        }
        Ok(self.response.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub research: Arc<FakeResearch>,
    pub generator: Arc<FakeGenerator>,
}

fn temp_database_url() -> String {
    let path = std::env::temp_dir().join(format!("blogforge-test-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}?mode=rwc", path.display())
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default(), Arc::new(FakeGenerator::json())).await
}

pub async fn spawn_app_with(config: Config, generator: Arc<FakeGenerator>) -> TestApp {
    let research = Arc::new(FakeResearch::default());
    let store = Store::new(&temp_database_url())
        .await
        .expect("Failed to open test database");

    let router = build_router(
        config,
        store.clone(),
        research.clone(),
        generator.clone(),
    );

    TestApp {
        router,
        store,
        research,
        generator,
    }
}

pub fn build_router(
    config: Config,
    store: Store,
    research: Arc<dyn KeywordResearchProvider>,
    generator: Arc<dyn ArticleGenerator>,
) -> Router {
    let shared = SharedState::with_providers(config, store, research, generator);
    let state = blogforge::api::create_app_state(Arc::new(shared), None);
    blogforge::api::router(state)
}

pub async fn open_store() -> Store {
    Store::new(&temp_database_url())
        .await
        .expect("Failed to open test database")
}

/// Sends a JSON request as `user` and returns the status and decoded body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str, user: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, Some(user), None).await
}

pub async fn post(app: &Router, uri: &str, user: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(user), Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, user: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PATCH", uri, Some(user), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, user: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, Some(user), None).await
}
