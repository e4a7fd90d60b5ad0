//! Return request endpoints.
//!
//! Every service failure is answered with 409 and the failure message, as
//! clients of these routes expect.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::require_admin;
use super::{ApiError, ApiResponse, AppState};
use crate::services::{
    CreatedReturnRequest, CurrentUser, ReturnRequestDto, ReturnRequestError, ReturnRequestFilter,
};

/// Reported when an asset still has an active assignment.
pub const VALID_ASSIGNMENT_EXISTS: &str = "User have valid assignment";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnRequest {
    pub assignment_id: Uuid,
}

impl From<ReturnRequestError> for ApiError {
    fn from(err: ReturnRequestError) -> Self {
        match err {
            ReturnRequestError::Forbidden(msg) => Self::Forbidden(msg),
            ReturnRequestError::Database(msg) | ReturnRequestError::Internal(msg) => {
                tracing::error!(error = %msg, "Return request operation failed");
                Self::Conflict("An error occurred while processing the return request.".to_string())
            }
            other => Self::Conflict(other.to_string()),
        }
    }
}

/// `GET /api/request-for-returning`
pub async fn list_return_requests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    filter: Result<Query<ReturnRequestFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ReturnRequestDto>>>, ApiError> {
    let Query(filter) = filter?;

    let (requests, total) = state
        .return_request_service()
        .list_return_requests(user.location_id, filter)
        .await?;

    Ok(Json(ApiResponse::page(
        "Get return requests successfully",
        requests,
        total,
    )))
}

/// `POST /api/request-for-returning`
pub async fn create_return_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateReturnRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreatedReturnRequest>>, ApiError> {
    let Json(payload) = payload?;

    let created = state
        .return_request_service()
        .create_return_request(payload.assignment_id, &user)
        .await?;

    Ok(Json(ApiResponse::success(
        "Create return request successfully",
        created,
    )))
}

/// `PUT /api/request-for-returning/CompleteRequest/{id}`
pub async fn complete_return_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(&user)?;
    let Path(id) = id?;

    state
        .return_request_service()
        .complete_return_request(id, user.id, Local::now().date_naive())
        .await?;

    Ok(Json(ApiResponse::ok("Complete return requests successfully")))
}

/// `DELETE /api/request-for-returning/CancelRequest/{id}`
pub async fn cancel_return_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(&user)?;
    let Path(id) = id?;

    let cancelled = state
        .return_request_service()
        .cancel_return_request(id)
        .await?;

    if !cancelled {
        return Err(ApiError::Conflict(VALID_ASSIGNMENT_EXISTS.to_string()));
    }

    Ok(Json(ApiResponse::ok("Request cancel successfully.")))
}
