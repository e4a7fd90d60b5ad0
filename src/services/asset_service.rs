//! Domain service for the asset catalogue: categories and assets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::AssetRow;
use crate::entities::categories;
use crate::entities::enums::AssetStatus;
use crate::services::auth_service::CurrentUser;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AssetError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AssetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

impl From<categories::Model> for CategoryDto {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub asset_code: String,
    pub asset_name: String,
    pub category_id: Uuid,
    #[serde(default = "default_asset_status")]
    pub status: AssetStatus,
    pub install_date: NaiveDate,
    #[serde(default)]
    pub specification: String,
}

const fn default_asset_status() -> AssetStatus {
    AssetStatus::Available
}

/// Listing parameters as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFilter {
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<i32>,
    pub category_id: Option<Uuid>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub category: String,
    pub state: AssetStatus,
    pub install_date: NaiveDate,
    pub location_id: Uuid,
}

impl From<AssetRow> for AssetDto {
    fn from(row: AssetRow) -> Self {
        Self {
            id: row.id,
            asset_code: row.asset_code,
            asset_name: row.asset_name,
            category: row.category,
            state: row.status,
            install_date: row.install_date,
            location_id: row.location_id,
        }
    }
}

#[async_trait::async_trait]
pub trait AssetService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryDto>, AssetError>;

    /// # Errors
    ///
    /// Returns [`AssetError::Conflict`] if the name or code is already taken.
    async fn create_category(
        &self,
        request: CreateCategoryRequest,
        creator: &CurrentUser,
    ) -> Result<CategoryDto, AssetError>;

    /// Creates an asset in the creator's location.
    ///
    /// # Errors
    ///
    /// - Returns [`AssetError::Conflict`] if the asset code is already taken
    /// - Returns [`AssetError::CategoryNotFound`] for an unknown category
    async fn create_asset(
        &self,
        request: CreateAssetRequest,
        creator: &CurrentUser,
    ) -> Result<AssetDto, AssetError>;

    /// One page of the assets in `location_id`, plus the total match count.
    async fn list_assets(
        &self,
        location_id: Uuid,
        filter: AssetFilter,
    ) -> Result<(Vec<AssetDto>, u64), AssetError>;
}
