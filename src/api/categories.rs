use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::auth::require_admin;
use super::validation::validate_category_request;
use super::{ApiError, ApiResponse, AppState};
use crate::services::{AssetError, CategoryDto, CreateCategoryRequest, CurrentUser};

impl From<AssetError> for ApiError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::CategoryNotFound => Self::Conflict(err.to_string()),
            AssetError::Conflict(msg) => Self::Conflict(msg),
            AssetError::Database(msg) => Self::DatabaseError(msg),
            AssetError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.asset_service().list_categories().await?;
    Ok(Json(ApiResponse::success("Successfully.", categories)))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    require_admin(&user)?;
    let Json(request) = payload?;
    validate_category_request(&request)?;

    let category = state
        .asset_service()
        .create_category(request, &user)
        .await?;

    Ok(Json(ApiResponse::success(
        "Category created successfully.",
        category,
    )))
}
