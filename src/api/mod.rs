use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ArticleService, GenerationService, KeywordService, QuotaService, StyleGuideService,
    SuggestionService,
};
use crate::state::SharedState;

mod articles;
pub mod auth;
mod error;
mod keywords;
pub mod observability;
mod quota;
mod style_guides;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn keyword_service(&self) -> &Arc<dyn KeywordService> {
        &self.shared.keyword_service
    }

    #[must_use]
    pub fn suggestion_service(&self) -> &Arc<SuggestionService> {
        &self.shared.suggestion_service
    }

    #[must_use]
    pub fn quota_service(&self) -> &QuotaService {
        &self.shared.quota_service
    }

    #[must_use]
    pub fn article_service(&self) -> &Arc<dyn ArticleService> {
        &self.shared.article_service
    }

    #[must_use]
    pub fn style_guide_service(&self) -> &Arc<dyn StyleGuideService> {
        &self.shared.style_guide_service
    }

    #[must_use]
    pub fn generation_service(&self) -> &Arc<GenerationService> {
        &self.shared.generation_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/health", get(observability::health))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/keywords",
            get(keywords::list_keywords).post(keywords::create_keyword),
        )
        .route("/keywords/bulk", post(keywords::bulk_create_keywords))
        .route(
            "/keywords/suggestions",
            post(keywords::keyword_suggestions),
        )
        .route(
            "/keywords/{id}",
            get(keywords::get_keyword)
                .patch(keywords::update_keyword)
                .delete(keywords::delete_keyword),
        )
        .route("/articles", get(articles::list_articles))
        .route("/articles/draft", post(articles::create_draft))
        .route("/articles/generate", post(articles::generate_article))
        .route("/articles/stats", get(articles::get_stats))
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .patch(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/style-guides",
            get(style_guides::list_style_guides).post(style_guides::create_style_guide),
        )
        .route(
            "/style-guides/{id}",
            get(style_guides::get_style_guide)
                .patch(style_guides::update_style_guide)
                .delete(style_guides::delete_style_guide),
        )
        .route(
            "/style-guides/{id}/default",
            post(style_guides::set_default_style_guide),
        )
        .route("/quota", get(quota::get_quota))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
