use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, QuotaStatusDto};
use crate::context::RequestContext;

/// Read-only quota view; does not create a ledger row.
pub async fn get_quota(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ApiResponse<QuotaStatusDto>>, ApiError> {
    let status = state.quota_service().status(&ctx).await?;
    Ok(Json(ApiResponse::success(status)))
}
