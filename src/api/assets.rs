use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::auth::require_admin;
use super::validation::{validate_asset_request, validate_page_size};
use super::{ApiError, ApiResponse, AppState};
use crate::services::{AssetDto, AssetFilter, CreateAssetRequest, CurrentUser};

/// `GET /api/assets`
///
/// Assets of the caller's location.
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    filter: Result<Query<AssetFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<AssetDto>>>, ApiError> {
    let Query(filter) = filter?;
    if let Some(size) = filter.page_size {
        validate_page_size(size)?;
    }

    let (assets, total) = state
        .asset_service()
        .list_assets(user.location_id, filter)
        .await?;

    Ok(Json(ApiResponse::page("Successfully.", assets, total)))
}

/// `POST /api/assets`
pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateAssetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    require_admin(&user)?;
    let Json(request) = payload?;
    validate_asset_request(&request)?;

    let asset = state.asset_service().create_asset(request, &user).await?;

    Ok(Json(ApiResponse::success("Asset created successfully.", asset)))
}
