//! Domain service for return requests: listing, opening, completing and
//! cancelling them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::ReturnRequestRow;
use crate::entities::enums::ReturnStatus;
use crate::services::auth_service::CurrentUser;

#[derive(Debug, Error)]
pub enum ReturnRequestError {
    #[error("Return request not found")]
    NotFound,

    #[error("Assignment not found")]
    AssignmentNotFound,

    /// The request or assignment is not in a state that allows the operation.
    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ReturnRequestError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReturnRequestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Listing parameters as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestFilter {
    pub page_number: Option<u64>,
    pub status: Option<i32>,
    pub return_date: Option<NaiveDate>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestDto {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub requested_by: String,
    pub assigned_date: NaiveDate,
    pub accepted_by: Option<String>,
    pub returned_date: Option<NaiveDate>,
    pub state: ReturnStatus,
}

impl From<ReturnRequestRow> for ReturnRequestDto {
    fn from(row: ReturnRequestRow) -> Self {
        Self {
            id: row.id,
            asset_code: row.asset_code,
            asset_name: row.asset_name,
            requested_by: row.requested_by,
            assigned_date: row.assigned_date,
            accepted_by: row.accepted_by,
            returned_date: row.returned_date,
            state: row.state,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReturnRequest {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub requested_by: Uuid,
    pub state: ReturnStatus,
}

#[async_trait::async_trait]
pub trait ReturnRequestService: Send + Sync {
    /// One page of the requests whose assignment was made in `location_id`,
    /// plus the total match count.
    async fn list_return_requests(
        &self,
        location_id: Uuid,
        filter: ReturnRequestFilter,
    ) -> Result<(Vec<ReturnRequestDto>, u64), ReturnRequestError>;

    /// Opens a return request for an accepted assignment.
    ///
    /// # Errors
    ///
    /// - Returns [`ReturnRequestError::Forbidden`] unless the caller holds the assignment or is an admin
    /// - Returns [`ReturnRequestError::InvalidState`] if the assignment is not accepted or already has an open request
    async fn create_return_request(
        &self,
        assignment_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<CreatedReturnRequest, ReturnRequestError>;

    /// Completes a pending request on behalf of `accepted_by`, returning the
    /// asset to stock as of `today`.
    async fn complete_return_request(
        &self,
        id: Uuid,
        accepted_by: Uuid,
        today: NaiveDate,
    ) -> Result<(), ReturnRequestError>;

    /// Cancels a pending request.
    ///
    /// Returns `false`, leaving everything untouched, when the asset already
    /// has another active assignment.
    async fn cancel_return_request(&self, id: Uuid) -> Result<bool, ReturnRequestError>;
}
