use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entities::{categories, prelude::*};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<categories::Model>> {
        Categories::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list categories")
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<categories::Model>> {
        Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category")
    }

    /// Existing category sharing the name or the code, if any.
    pub async fn find_conflict(&self, name: &str, code: &str) -> Result<Option<categories::Model>> {
        Categories::find()
            .filter(
                Condition::any()
                    .add(categories::Column::Name.eq(name))
                    .add(categories::Column::Code.eq(code)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query category conflicts")
    }

    pub async fn insert(&self, category: categories::ActiveModel) -> Result<categories::Model> {
        category
            .insert(&self.conn)
            .await
            .context("Failed to insert category")
    }
}
