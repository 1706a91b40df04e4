use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, MessageResponse, StyleGuideDto, StyleGuideRequest,
    UpdateStyleGuideRequest,
};
use crate::context::RequestContext;

pub async fn list_style_guides(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ApiResponse<Vec<StyleGuideDto>>>, ApiError> {
    let guides = state.style_guide_service().list(&ctx).await?;
    Ok(Json(ApiResponse::success(guides)))
}

/// Saves the onboarding form. The caller's first guide becomes the default.
pub async fn create_style_guide(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<StyleGuideRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<StyleGuideDto>>), ApiError> {
    let Json(payload) = payload?;
    let guide = state.style_guide_service().create(&ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(guide))))
}

pub async fn get_style_guide(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StyleGuideDto>>, ApiError> {
    let guide = state.style_guide_service().get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(guide)))
}

pub async fn update_style_guide(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStyleGuideRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StyleGuideDto>>, ApiError> {
    let Json(payload) = payload?;
    let guide = state
        .style_guide_service()
        .update(&ctx, &id, payload)
        .await?;
    Ok(Json(ApiResponse::success(guide)))
}

pub async fn delete_style_guide(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.style_guide_service().delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Style guide deleted".to_string(),
    })))
}

pub async fn set_default_style_guide(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StyleGuideDto>>, ApiError> {
    let guide = state.style_guide_service().set_default(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(guide)))
}
