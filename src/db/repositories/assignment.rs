use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::enums::{AssetStatus, AssignmentState};
use crate::entities::{assets, assignments, prelude::*};

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub asset_id: Uuid,
    pub assigned_to: Uuid,
    pub assigned_by: Uuid,
    pub assigned_date: NaiveDate,
    pub note: Option<String>,
}

pub struct AssignmentRepository {
    conn: DatabaseConnection,
}

impl AssignmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<assignments::Model>> {
        Assignments::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query assignment")
    }

    /// Records the assignment and marks the asset as assigned.
    pub async fn create(&self, new: NewAssignment) -> Result<assignments::Model> {
        let txn = self.conn.begin().await?;

        let assignment = assignments::ActiveModel {
            id: Set(Uuid::new_v4()),
            asset_id: Set(new.asset_id),
            assigned_to: Set(new.assigned_to),
            assigned_by: Set(new.assigned_by),
            assigned_date: Set(new.assigned_date),
            note: Set(new.note),
            state: Set(AssignmentState::WaitingForAcceptance),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        }
        .insert(&txn)
        .await?;

        assets::ActiveModel {
            id: Set(new.asset_id),
            status: Set(AssetStatus::Assigned),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(assignment)
    }

    pub async fn set_state(&self, id: Uuid, state: AssignmentState) -> Result<()> {
        assignments::ActiveModel {
            id: Set(id),
            state: Set(state),
            ..Default::default()
        }
        .update(&self.conn)
        .await
        .context("Failed to update assignment state")?;

        Ok(())
    }

    /// Whether the asset is held under any assignment other than `excluding`.
    pub async fn has_other_active(&self, asset_id: Uuid, excluding: Uuid) -> Result<bool> {
        let count = Assignments::find()
            .filter(assignments::Column::AssetId.eq(asset_id))
            .filter(assignments::Column::Id.ne(excluding))
            .filter(assignments::Column::State.is_in(AssignmentState::ACTIVE))
            .count(&self.conn)
            .await
            .context("Failed to count active assignments")?;

        Ok(count > 0)
    }
}
