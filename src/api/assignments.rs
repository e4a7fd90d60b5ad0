use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use super::auth::require_admin;
use super::{ApiError, ApiResponse, AppState};
use crate::services::{AssignmentDto, AssignmentError, CreateAssignmentRequest, CurrentUser};

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::NotFound => Self::NotFound(err.to_string()),
            AssignmentError::Validation(msg) => Self::Conflict(msg),
            AssignmentError::Forbidden(msg) => Self::Forbidden(msg),
            AssignmentError::Database(msg) => Self::DatabaseError(msg),
            AssignmentError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `POST /api/assignments`
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateAssignmentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AssignmentDto>>, ApiError> {
    require_admin(&user)?;
    let Json(request) = payload?;

    let assignment = state
        .assignment_service()
        .create_assignment(request, &user)
        .await?;

    Ok(Json(ApiResponse::success(
        "Assignment created successfully.",
        assignment,
    )))
}

/// `PUT /api/assignments/{id}/accept`
pub async fn accept_assignment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<AssignmentDto>>, ApiError> {
    let Path(id) = id?;

    let assignment = state
        .assignment_service()
        .accept_assignment(id, &user)
        .await?;

    Ok(Json(ApiResponse::success(
        "Assignment accepted successfully.",
        assignment,
    )))
}
