use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_article_list;
use super::{
    ApiError, ApiResponse, AppState, ArticleDto, ArticleListResponse, CreateArticleRequest,
    DashboardStats, GenerateArticleRequest, GenerateArticleResponse, ListArticlesQuery,
    MessageResponse, UpdateArticleRequest,
};
use crate::context::RequestContext;

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ArticleDto>>), ApiError> {
    let Json(payload) = payload?;
    let article = state.article_service().create_draft(&ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(article))))
}

/// Runs the model, stores the result as a draft and counts it against the
/// caller's quota.
pub async fn generate_article(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<GenerateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<GenerateArticleResponse>>), ApiError> {
    let Json(payload) = payload?;
    let result = state.generation_service().generate(&ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

/// `GET /api/articles?limit=&offset=&status=&sortBy=&sortOrder=`
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<ListArticlesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ArticleListResponse>>, ApiError> {
    let Query(query) = query?;
    let params = validate_article_list(query)?;
    let result = state.article_service().list(&ctx, params).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.article_service().stats(&ctx).await?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    let article = state.article_service().get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(article)))
}

pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    let Json(payload) = payload?;
    let article = state.article_service().update(&ctx, &id, payload).await?;
    Ok(Json(ApiResponse::success(article)))
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.article_service().delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Article deleted".to_string(),
    })))
}
