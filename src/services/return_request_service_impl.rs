//! `SeaORM` implementation of the `ReturnRequestService` trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AccountsConfig;
use crate::db::query::page_index;
use crate::db::{ReturnRequestQuery, Store};
use crate::domain::{ReturnRequestSortKey, SortOrder};
use crate::entities::enums::{AssignmentState, ReturnStatus};
use crate::entities::return_requests;
use crate::services::auth_service::CurrentUser;
use crate::services::return_request_service::{
    CreatedReturnRequest, ReturnRequestDto, ReturnRequestError, ReturnRequestFilter,
    ReturnRequestService,
};

pub struct SeaOrmReturnRequestService {
    store: Store,
    accounts: AccountsConfig,
}

impl SeaOrmReturnRequestService {
    #[must_use]
    pub const fn new(store: Store, accounts: AccountsConfig) -> Self {
        Self { store, accounts }
    }

    async fn pending(
        &self,
        id: Uuid,
    ) -> Result<(return_requests::Model, crate::entities::assignments::Model), ReturnRequestError>
    {
        let (request, assignment) = self
            .store
            .get_return_request_with_assignment(id)
            .await?
            .ok_or(ReturnRequestError::NotFound)?;

        if request.return_status != ReturnStatus::Requested {
            return Err(ReturnRequestError::InvalidState(
                "Return request is not waiting to be processed".to_string(),
            ));
        }

        Ok((request, assignment))
    }
}

#[async_trait]
impl ReturnRequestService for SeaOrmReturnRequestService {
    async fn list_return_requests(
        &self,
        location_id: Uuid,
        filter: ReturnRequestFilter,
    ) -> Result<(Vec<ReturnRequestDto>, u64), ReturnRequestError> {
        let query = ReturnRequestQuery {
            location_id,
            status: filter.status,
            return_date: filter.return_date,
            search_term: filter.search_term,
            sort_by: ReturnRequestSortKey::from_param(filter.sort_by.as_deref()),
            sort_order: SortOrder::from_param(filter.sort_order.as_deref().unwrap_or("asc")),
            page_index: page_index(filter.page_number, self.accounts.default_page_size),
            page_size: self.accounts.default_page_size,
        };

        let (rows, total) = self.store.list_return_requests(&query).await?;
        Ok((rows.into_iter().map(ReturnRequestDto::from).collect(), total))
    }

    async fn create_return_request(
        &self,
        assignment_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<CreatedReturnRequest, ReturnRequestError> {
        let assignment = self
            .store
            .get_assignment(assignment_id)
            .await?
            .ok_or(ReturnRequestError::AssignmentNotFound)?;

        if assignment.assigned_to != caller.id && !caller.is_admin() {
            return Err(ReturnRequestError::Forbidden(
                "Only the assignee or an admin can request a return".to_string(),
            ));
        }

        if assignment.state != AssignmentState::Accepted {
            return Err(ReturnRequestError::InvalidState(
                "Only accepted assignments can be returned".to_string(),
            ));
        }

        if self.store.has_open_return_request(assignment_id).await? {
            return Err(ReturnRequestError::InvalidState(
                "A return request is already open for this assignment".to_string(),
            ));
        }

        let request = self
            .store
            .create_return_request(assignment_id, caller.id)
            .await?;

        info!(request_id = %request.id, %assignment_id, requested_by = %caller.username, "Return requested");

        Ok(CreatedReturnRequest {
            id: request.id,
            assignment_id: request.assignment_id,
            requested_by: request.requested_by,
            state: request.return_status,
        })
    }

    async fn complete_return_request(
        &self,
        id: Uuid,
        accepted_by: Uuid,
        today: NaiveDate,
    ) -> Result<(), ReturnRequestError> {
        let (request, assignment) = self.pending(id).await?;

        self.store
            .complete_return_request(request.id, &assignment, accepted_by, today)
            .await?;

        info!(request_id = %id, asset_id = %assignment.asset_id, "Return request completed");
        Ok(())
    }

    async fn cancel_return_request(&self, id: Uuid) -> Result<bool, ReturnRequestError> {
        let (request, assignment) = self.pending(id).await?;

        if self
            .store
            .asset_has_other_active_assignment(assignment.asset_id, assignment.id)
            .await?
        {
            warn!(request_id = %id, asset_id = %assignment.asset_id, "Cancel blocked by an active assignment");
            return Ok(false);
        }

        self.store
            .cancel_return_request(request.id, assignment.id)
            .await?;

        info!(request_id = %id, "Return request cancelled");
        Ok(true)
    }
}
