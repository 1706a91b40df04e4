use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{validate_bulk_phrases, validate_keyword_page};
use super::{
    ApiError, ApiResponse, AppState, BulkCreateKeywordsRequest, BulkCreateKeywordsResponse,
    CreateKeywordRequest, KeywordDto, KeywordListResponse, KeywordSuggestionsRequest,
    KeywordSuggestionsResponse, ListKeywordsQuery, MessageResponse, UpdateKeywordRequest,
};
use crate::context::RequestContext;
use crate::services::SuggestionQuery;

/// `GET /api/keywords?query=&page=&limit=`
pub async fn list_keywords(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<ListKeywordsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<KeywordListResponse>>, ApiError> {
    let Query(query) = query?;
    let page = validate_keyword_page(query)?;
    let result = state.keyword_service().list(&ctx, page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn create_keyword(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateKeywordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<KeywordDto>>), ApiError> {
    let Json(payload) = payload?;
    let keyword = state
        .keyword_service()
        .create(&ctx, &payload.phrase)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(keyword))))
}

/// Imports phrases picked from the suggestion list.
pub async fn bulk_create_keywords(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<BulkCreateKeywordsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BulkCreateKeywordsResponse>>), ApiError> {
    let Json(payload) = payload?;
    validate_bulk_phrases(&payload.phrases)?;
    let result = state
        .keyword_service()
        .bulk_create(&ctx, &payload.phrases)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

pub async fn keyword_suggestions(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<KeywordSuggestionsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<KeywordSuggestionsResponse>>, ApiError> {
    let Json(payload) = payload?;
    let query = SuggestionQuery::from_request(payload)?;
    let result = state.suggestion_service().fetch(&ctx, &query).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_keyword(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<KeywordDto>>, ApiError> {
    let keyword = state.keyword_service().get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(keyword)))
}

pub async fn update_keyword(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateKeywordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<KeywordDto>>, ApiError> {
    let Json(payload) = payload?;
    let keyword = state
        .keyword_service()
        .update(&ctx, &id, payload.phrase.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(keyword)))
}

pub async fn delete_keyword(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.keyword_service().delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Keyword deleted".to_string(),
    })))
}
