//! `SeaORM` implementation of the `AssignmentService` trait.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::db::{NewAssignment, Store};
use crate::entities::enums::{AssetStatus, AssignmentState, UserStatus};
use crate::services::assignment_service::{
    AssignmentDto, AssignmentError, AssignmentService, CreateAssignmentRequest,
};
use crate::services::auth_service::CurrentUser;

pub struct SeaOrmAssignmentService {
    store: Store,
}

impl SeaOrmAssignmentService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn invalid(message: &str) -> AssignmentError {
    AssignmentError::Validation(message.to_string())
}

#[async_trait]
impl AssignmentService for SeaOrmAssignmentService {
    async fn create_assignment(
        &self,
        request: CreateAssignmentRequest,
        admin: &CurrentUser,
    ) -> Result<AssignmentDto, AssignmentError> {
        let asset = self
            .store
            .get_asset(request.asset_id)
            .await?
            .ok_or_else(|| invalid("Asset not found"))?;

        if asset.location_id != admin.location_id {
            return Err(invalid("Asset belongs to another location"));
        }
        if asset.status != AssetStatus::Available {
            return Err(invalid("Asset is not available"));
        }

        let assignee = self
            .store
            .get_user(request.assigned_to)
            .await?
            .ok_or_else(|| invalid("User not found"))?;

        if assignee.status != UserStatus::Active || assignee.location_id != admin.location_id {
            return Err(invalid("User cannot receive assignments in this location"));
        }

        let assignment = self
            .store
            .create_assignment(NewAssignment {
                asset_id: asset.id,
                assigned_to: assignee.id,
                assigned_by: admin.id,
                assigned_date: request.assigned_date,
                note: request.note.filter(|n| !n.trim().is_empty()),
            })
            .await?;

        info!(
            asset_code = %asset.asset_code,
            assigned_to = %assignee.username,
            assigned_by = %admin.username,
            "Asset assigned"
        );

        Ok(assignment.into())
    }

    async fn accept_assignment(
        &self,
        id: Uuid,
        caller: &CurrentUser,
    ) -> Result<AssignmentDto, AssignmentError> {
        let mut assignment = self
            .store
            .get_assignment(id)
            .await?
            .ok_or(AssignmentError::NotFound)?;

        if assignment.assigned_to != caller.id {
            return Err(AssignmentError::Forbidden(
                "Only the assignee can accept an assignment".to_string(),
            ));
        }
        if assignment.state != AssignmentState::WaitingForAcceptance {
            return Err(invalid("Assignment is not waiting for acceptance"));
        }

        self.store
            .set_assignment_state(id, AssignmentState::Accepted)
            .await?;
        assignment.state = AssignmentState::Accepted;

        info!(assignment_id = %id, username = %caller.username, "Assignment accepted");
        Ok(assignment.into())
    }
}
