use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::sea_query::{Alias, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoSimpleExpr, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::db::query::{ConditionBuilder, aliased, contains_pattern, order_of, search_term};
use crate::domain::{ReturnRequestSortKey, SortOrder};
use crate::entities::enums::{AssetStatus, AssignmentState, ReturnStatus};
use crate::entities::{assets, assignments, prelude::*, return_requests, users};

// `users` is joined three times, once per role it plays in a request.
const USER_TO: &str = "user_to";
const USER_BY: &str = "user_by";
const USER_ACCEPT: &str = "user_accept";

/// Filters for the return request listing.
#[derive(Debug, Clone, Default)]
pub struct ReturnRequestQuery {
    pub location_id: Uuid,
    /// `None` and `Some(0)` both mean any status.
    pub status: Option<i32>,
    pub return_date: Option<NaiveDate>,
    pub search_term: Option<String>,
    pub sort_by: ReturnRequestSortKey,
    pub sort_order: SortOrder,
    /// Zero-based
    pub page_index: u64,
    pub page_size: u64,
}

/// Projected row of the return request listing.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ReturnRequestRow {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub requested_by: String,
    pub assigned_date: NaiveDate,
    pub accepted_by: Option<String>,
    pub returned_date: Option<NaiveDate>,
    pub state: ReturnStatus,
}

pub struct ReturnRequestRepository {
    conn: DatabaseConnection,
}

impl ReturnRequestRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<return_requests::Model>> {
        ReturnRequests::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query return request")
    }

    /// Request together with the assignment it returns.
    pub async fn get_with_assignment(
        &self,
        id: Uuid,
    ) -> Result<Option<(return_requests::Model, assignments::Model)>> {
        let found = ReturnRequests::find_by_id(id)
            .find_also_related(Assignments)
            .one(&self.conn)
            .await
            .context("Failed to query return request")?;

        Ok(found.and_then(|(request, assignment)| assignment.map(|a| (request, a))))
    }

    pub async fn has_open_request(&self, assignment_id: Uuid) -> Result<bool> {
        let count = ReturnRequests::find()
            .filter(return_requests::Column::AssignmentId.eq(assignment_id))
            .filter(return_requests::Column::ReturnStatus.eq(ReturnStatus::Requested))
            .count(&self.conn)
            .await
            .context("Failed to count open return requests")?;

        Ok(count > 0)
    }

    /// Opens a request and marks the assignment as waiting for its return.
    pub async fn create(
        &self,
        assignment_id: Uuid,
        requested_by: Uuid,
    ) -> Result<return_requests::Model> {
        let txn = self.conn.begin().await?;

        let request = return_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            assignment_id: Set(assignment_id),
            requested_by: Set(requested_by),
            accepted_by: Set(None),
            return_date: Set(None),
            return_status: Set(ReturnStatus::Requested),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        }
        .insert(&txn)
        .await?;

        assignments::ActiveModel {
            id: Set(assignment_id),
            state: Set(AssignmentState::WaitingForReturning),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(request)
    }

    /// Completes the request, closes the assignment and frees the asset.
    pub async fn complete(
        &self,
        request_id: Uuid,
        assignment: &assignments::Model,
        accepted_by: Uuid,
        return_date: NaiveDate,
    ) -> Result<()> {
        let txn = self.conn.begin().await?;

        return_requests::ActiveModel {
            id: Set(request_id),
            accepted_by: Set(Some(accepted_by)),
            return_date: Set(Some(return_date)),
            return_status: Set(ReturnStatus::Completed),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        assignments::ActiveModel {
            id: Set(assignment.id),
            state: Set(AssignmentState::Returned),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        assets::ActiveModel {
            id: Set(assignment.asset_id),
            status: Set(AssetStatus::Available),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Cancels the request and hands the assignment back to its holder.
    pub async fn cancel(&self, request_id: Uuid, assignment_id: Uuid) -> Result<()> {
        let txn = self.conn.begin().await?;

        return_requests::ActiveModel {
            id: Set(request_id),
            return_status: Set(ReturnStatus::Cancelled),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        assignments::ActiveModel {
            id: Set(assignment_id),
            state: Set(AssignmentState::Accepted),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// One page of requests whose assignment was made in `query.location_id`.
    pub async fn list(&self, query: &ReturnRequestQuery) -> Result<(Vec<ReturnRequestRow>, u64)> {
        let search = search_term(query.search_term.as_deref());

        let condition = ConditionBuilder::new()
            .and(aliased(USER_BY, users::Column::LocationId).eq(query.location_id))
            .and_if(query.status.filter(|status| *status != 0), |status| {
                return_requests::Column::ReturnStatus.eq(status)
            })
            .and_if(query.return_date, |date| {
                return_requests::Column::ReturnDate.eq(date)
            })
            .and_if(search, search_condition)
            .build();

        let select = ReturnRequests::find()
            .select_only()
            .column(return_requests::Column::Id)
            .column_as(assets::Column::AssetCode, "asset_code")
            .column_as(assets::Column::AssetName, "asset_name")
            .column_as(
                SimpleExpr::from(aliased(USER_TO, users::Column::Username)),
                "requested_by",
            )
            .column_as(assignments::Column::AssignedDate, "assigned_date")
            .column_as(
                SimpleExpr::from(aliased(USER_ACCEPT, users::Column::Username)),
                "accepted_by",
            )
            .column_as(return_requests::Column::ReturnDate, "returned_date")
            .column_as(return_requests::Column::ReturnStatus, "state")
            .join(JoinType::InnerJoin, return_requests::Relation::Assignment.def())
            .join(JoinType::InnerJoin, assignments::Relation::Asset.def())
            .join_as(
                JoinType::InnerJoin,
                assignments::Relation::UserTo.def(),
                Alias::new(USER_TO),
            )
            .join_as(
                JoinType::InnerJoin,
                assignments::Relation::UserBy.def(),
                Alias::new(USER_BY),
            )
            .join_as(
                JoinType::LeftJoin,
                return_requests::Relation::UserAccept.def(),
                Alias::new(USER_ACCEPT),
            )
            .filter(condition)
            .order_by(sort_expr(query.sort_by), order_of(query.sort_order))
            .order_by_asc(return_requests::Column::CreatedAt);

        let paginator = select
            .into_model::<ReturnRequestRow>()
            .paginate(&self.conn, query.page_size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(query.page_index).await?;

        Ok((items, total))
    }
}

/// Substring match on asset code, asset name or the holder's username.
fn search_condition(term: &str) -> Condition {
    let pattern = contains_pattern(term);
    Condition::any()
        .add(assets::Column::AssetCode.like(pattern.as_str()))
        .add(assets::Column::AssetName.like(pattern.as_str()))
        .add(aliased(USER_TO, users::Column::Username).like(pattern.as_str()))
}

fn sort_expr(key: ReturnRequestSortKey) -> SimpleExpr {
    match key {
        ReturnRequestSortKey::AssetCode => assets::Column::AssetCode.into_simple_expr(),
        ReturnRequestSortKey::AssetName => assets::Column::AssetName.into_simple_expr(),
        ReturnRequestSortKey::RequestedBy => aliased(USER_TO, users::Column::Username).into(),
        ReturnRequestSortKey::AssignedDate => assignments::Column::AssignedDate.into_simple_expr(),
        ReturnRequestSortKey::AcceptedBy => aliased(USER_ACCEPT, users::Column::Username).into(),
        ReturnRequestSortKey::ReturnedDate => return_requests::Column::ReturnDate.into_simple_expr(),
        ReturnRequestSortKey::State => return_requests::Column::ReturnStatus.into_simple_expr(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    #[test]
    fn search_matches_every_column_with_the_same_pattern() {
        let sql = ReturnRequests::find()
            .filter(search_condition("dell"))
            .build(DatabaseBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#""assets"."asset_code" LIKE '%dell%'"#), "{sql}");
        assert!(sql.contains(r#""assets"."asset_name" LIKE '%dell%'"#), "{sql}");
        assert!(sql.contains(r#""user_to"."username" LIKE '%dell%'"#), "{sql}");
        assert_eq!(sql.matches(" OR ").count(), 2, "{sql}");
    }
}
