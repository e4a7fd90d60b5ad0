//! Domain service for handing assets to users.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::assignments;
use crate::entities::enums::AssignmentState;
use crate::services::auth_service::CurrentUser;

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Assignment not found")]
    NotFound,

    /// The asset or assignee cannot take part in the assignment.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AssignmentError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AssignmentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub asset_id: Uuid,
    pub assigned_to: Uuid,
    pub assigned_date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDto {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub assigned_to: Uuid,
    pub assigned_by: Uuid,
    pub assigned_date: NaiveDate,
    pub note: Option<String>,
    pub state: AssignmentState,
}

impl From<assignments::Model> for AssignmentDto {
    fn from(model: assignments::Model) -> Self {
        Self {
            id: model.id,
            asset_id: model.asset_id,
            assigned_to: model.assigned_to,
            assigned_by: model.assigned_by,
            assigned_date: model.assigned_date,
            note: model.note,
            state: model.state,
        }
    }
}

#[async_trait::async_trait]
pub trait AssignmentService: Send + Sync {
    /// Assigns an available asset of the admin's location to an active user there.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Validation`] when the asset or the assignee does not qualify.
    async fn create_assignment(
        &self,
        request: CreateAssignmentRequest,
        admin: &CurrentUser,
    ) -> Result<AssignmentDto, AssignmentError>;

    /// The assignee accepts an assignment waiting for them.
    ///
    /// # Errors
    ///
    /// - Returns [`AssignmentError::Forbidden`] if the caller is not the assignee
    /// - Returns [`AssignmentError::Validation`] if the assignment is not waiting for acceptance
    async fn accept_assignment(
        &self,
        id: Uuid,
        caller: &CurrentUser,
    ) -> Result<AssignmentDto, AssignmentError>;
}
