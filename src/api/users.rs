//! User registration and search endpoints.

use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::require_admin;
use super::validation::{validate_page_size, validate_register_request};
use super::{ApiError, ApiResponse, AppState};
use crate::db::UserSearch;
use crate::db::query::page_index;
use crate::domain::{SortOrder, UserSortKey};
use crate::services::{
    CurrentUser, REGISTRATION_FAILED, RegisterUserRequest, RegisteredUser, UserError,
    UserListItem,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchParams {
    /// Defaults to the caller's location.
    pub location: Option<Uuid>,
    pub search_term: Option<String>,
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) | UserError::Persistence(msg) => Self::Conflict(msg),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `POST /api/users`
///
/// Registers a user in the calling admin's location. Model errors are 400,
/// rule violations and storage failures 409, anything else 500.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RegisteredUser>>, ApiError> {
    require_admin(&user)?;
    let Json(request) = payload?;
    validate_register_request(&request)?;

    let today = Local::now().date_naive();
    let registered = state
        .user_service()
        .register_user(request, user.id, today)
        .await
        .map_err(|err| match err {
            UserError::Validation(msg) | UserError::Persistence(msg) => ApiError::Conflict(msg),
            other => ApiError::Failed {
                message: REGISTRATION_FAILED,
                detail: other.to_string(),
            },
        })?;

    Ok(Json(ApiResponse::success(
        "User registered successfully.",
        registered,
    )))
}

/// `GET /api/users/search`
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    params: Result<Query<UserSearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<UserListItem>>>, ApiError> {
    let Query(params) = params?;
    let default_page_size = state.config().read().await.accounts.default_page_size;
    let page_size = validate_page_size(params.page_size.unwrap_or(default_page_size))?;

    let search = UserSearch {
        location_id: params.location.unwrap_or(user.location_id),
        search_term: params.search_term,
        role: params.role.filter(|r| !r.trim().is_empty()),
        sort_by: UserSortKey::from_param(params.sort_by.as_deref()),
        sort_order: SortOrder::from_param(params.sort_direction.as_deref().unwrap_or("asc")),
        page_index: page_index(params.page_number, page_size),
        page_size,
    };

    let (users, total) = state.user_service().search_users(search).await?;
    Ok(Json(ApiResponse::page("Successfully.", users, total)))
}
