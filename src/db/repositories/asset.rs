use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::db::query::{ConditionBuilder, contains_pattern, order_of, search_term};
use crate::domain::{AssetSortKey, SortOrder};
use crate::entities::enums::AssetStatus;
use crate::entities::{assets, categories, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct AssetQuery {
    pub location_id: Uuid,
    /// `None` and `Some(0)` both mean any status.
    pub status: Option<i32>,
    pub category_id: Option<Uuid>,
    pub search_term: Option<String>,
    pub sort_by: AssetSortKey,
    pub sort_order: SortOrder,
    /// Zero-based
    pub page_index: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct AssetRow {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub category: String,
    pub status: AssetStatus,
    pub install_date: NaiveDate,
    pub location_id: Uuid,
}

pub struct AssetRepository {
    conn: DatabaseConnection,
}

impl AssetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<assets::Model>> {
        Assets::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query asset")
    }

    pub async fn code_exists(&self, asset_code: &str) -> Result<bool> {
        let count = Assets::find()
            .filter(assets::Column::AssetCode.eq(asset_code))
            .count(&self.conn)
            .await
            .context("Failed to query asset code")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, asset: assets::ActiveModel) -> Result<assets::Model> {
        asset
            .insert(&self.conn)
            .await
            .context("Failed to insert asset")
    }

    pub async fn list(&self, query: &AssetQuery) -> Result<(Vec<AssetRow>, u64)> {
        let condition = ConditionBuilder::new()
            .and(assets::Column::LocationId.eq(query.location_id))
            .and_if(query.status.filter(|status| *status != 0), |status| {
                assets::Column::Status.eq(status)
            })
            .and_if(query.category_id, |id| assets::Column::CategoryId.eq(id))
            .and_if(search_term(query.search_term.as_deref()), |term| {
                Condition::any()
                    .add(assets::Column::AssetCode.like(contains_pattern(term)))
                    .add(assets::Column::AssetName.like(contains_pattern(term)))
            })
            .build();

        let order = order_of(query.sort_order);
        let select = Assets::find()
            .select_only()
            .columns([
                assets::Column::Id,
                assets::Column::AssetCode,
                assets::Column::AssetName,
                assets::Column::Status,
                assets::Column::InstallDate,
                assets::Column::LocationId,
            ])
            .column_as(categories::Column::Name, "category")
            .join(JoinType::InnerJoin, assets::Relation::Category.def())
            .filter(condition);

        let select = match query.sort_by {
            AssetSortKey::AssetCode => select.order_by(assets::Column::AssetCode, order),
            AssetSortKey::AssetName => select.order_by(assets::Column::AssetName, order),
            AssetSortKey::Category => select.order_by(categories::Column::Name, order),
            AssetSortKey::State => select.order_by(assets::Column::Status, order),
        }
        .order_by_asc(assets::Column::AssetCode);

        let paginator = select
            .into_model::<AssetRow>()
            .paginate(&self.conn, query.page_size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(query.page_index).await?;

        Ok((items, total))
    }
}
