//! `SeaORM` implementation of the `AssetService` trait.

use async_trait::async_trait;
use sea_orm::Set;
use tracing::info;
use uuid::Uuid;

use crate::config::AccountsConfig;
use crate::constants::paging::MAX_PAGE_SIZE;
use crate::db::query::page_index;
use crate::db::{AssetQuery, Store};
use crate::domain::{AssetSortKey, SortOrder};
use crate::entities::{assets, categories};
use crate::services::asset_service::{
    AssetDto, AssetError, AssetFilter, AssetService, CategoryDto, CreateAssetRequest,
    CreateCategoryRequest,
};
use crate::services::auth_service::CurrentUser;

pub struct SeaOrmAssetService {
    store: Store,
    accounts: AccountsConfig,
}

impl SeaOrmAssetService {
    #[must_use]
    pub const fn new(store: Store, accounts: AccountsConfig) -> Self {
        Self { store, accounts }
    }
}

#[async_trait]
impl AssetService for SeaOrmAssetService {
    async fn list_categories(&self) -> Result<Vec<CategoryDto>, AssetError> {
        let categories = self.store.list_categories().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    async fn create_category(
        &self,
        request: CreateCategoryRequest,
        creator: &CurrentUser,
    ) -> Result<CategoryDto, AssetError> {
        let name = request.name.trim();
        let code = request.code.trim().to_uppercase();

        if let Some(existing) = self.store.find_category_conflict(name, &code).await? {
            let field = if existing.name == name { "name" } else { "code" };
            return Err(AssetError::Conflict(format!(
                "Category {field} is already in use"
            )));
        }

        let category = self
            .store
            .insert_category(categories::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.to_string()),
                code: Set(code),
                created_by: Set(creator.id),
                created_at: Set(chrono::Utc::now().to_rfc3339()),
            })
            .await?;

        info!(category = %category.name, code = %category.code, "Category created");
        Ok(category.into())
    }

    async fn create_asset(
        &self,
        request: CreateAssetRequest,
        creator: &CurrentUser,
    ) -> Result<AssetDto, AssetError> {
        let asset_code = request.asset_code.trim();

        if self.store.asset_code_exists(asset_code).await? {
            return Err(AssetError::Conflict(format!(
                "Asset code {asset_code} is already in use"
            )));
        }

        let category = self
            .store
            .get_category(request.category_id)
            .await?
            .ok_or(AssetError::CategoryNotFound)?;

        let asset = self
            .store
            .insert_asset(assets::ActiveModel {
                id: Set(Uuid::new_v4()),
                asset_code: Set(asset_code.to_string()),
                asset_name: Set(request.asset_name.trim().to_string()),
                category_id: Set(category.id),
                location_id: Set(creator.location_id),
                status: Set(request.status),
                install_date: Set(request.install_date),
                specification: Set(request.specification),
                created_by: Set(creator.id),
                created_at: Set(chrono::Utc::now().to_rfc3339()),
            })
            .await?;

        info!(asset_code = %asset.asset_code, created_by = %creator.username, "Asset created");

        Ok(AssetDto {
            id: asset.id,
            asset_code: asset.asset_code,
            asset_name: asset.asset_name,
            category: category.name,
            state: asset.status,
            install_date: asset.install_date,
            location_id: asset.location_id,
        })
    }

    async fn list_assets(
        &self,
        location_id: Uuid,
        filter: AssetFilter,
    ) -> Result<(Vec<AssetDto>, u64), AssetError> {
        let page_size = filter
            .page_size
            .unwrap_or(self.accounts.default_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let query = AssetQuery {
            location_id,
            status: filter.status,
            category_id: filter.category_id,
            search_term: filter.search_term,
            sort_by: AssetSortKey::from_param(filter.sort_by.as_deref()),
            sort_order: SortOrder::from_param(filter.sort_order.as_deref().unwrap_or("asc")),
            page_index: page_index(filter.page_number, page_size),
            page_size,
        };

        let (rows, total) = self.store.list_assets(&query).await?;
        Ok((rows.into_iter().map(AssetDto::from).collect(), total))
    }
}
