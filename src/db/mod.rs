use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::entities::enums::{AssignmentState, UserStatus};
use crate::entities::{assets, assignments, categories, return_requests, roles, users};

pub mod migrator;
pub mod query;
pub mod repositories;

pub use repositories::asset::{AssetQuery, AssetRow};
pub use repositories::assignment::NewAssignment;
pub use repositories::return_request::{ReturnRequestQuery, ReturnRequestRow};
pub use repositories::user::{User, UserRow, UserSearch};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn asset_repo(&self) -> repositories::asset::AssetRepository {
        repositories::asset::AssetRepository::new(self.conn.clone())
    }

    fn assignment_repo(&self) -> repositories::assignment::AssignmentRepository {
        repositories::assignment::AssignmentRepository::new(self.conn.clone())
    }

    fn return_request_repo(&self) -> repositories::return_request::ReturnRequestRepository {
        repositories::return_request::ReturnRequestRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_with_password(&self, username: &str) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_username_with_password(username).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn get_role(&self, role_id: Uuid) -> Result<Option<roles::Model>> {
        self.user_repo().get_role(role_id).await
    }

    pub async fn latest_staff_code(&self) -> Result<Option<String>> {
        self.user_repo().latest_staff_code().await
    }

    pub async fn usernames_starting_with(&self, base: &str) -> Result<Vec<String>> {
        self.user_repo().usernames_starting_with(base).await
    }

    pub async fn insert_user(&self, user: users::ActiveModel) -> Result<users::Model> {
        self.user_repo().insert(user).await
    }

    pub async fn set_user_status(&self, id: Uuid, status: UserStatus) -> Result<()> {
        self.user_repo().set_status(id, status).await
    }

    pub async fn search_users(&self, search: &UserSearch) -> Result<(Vec<UserRow>, u64)> {
        self.user_repo().search(search).await
    }

    // ========================================================================
    // Categories & Assets
    // ========================================================================

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list().await
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<categories::Model>> {
        self.category_repo().get(id).await
    }

    pub async fn find_category_conflict(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<categories::Model>> {
        self.category_repo().find_conflict(name, code).await
    }

    pub async fn insert_category(
        &self,
        category: categories::ActiveModel,
    ) -> Result<categories::Model> {
        self.category_repo().insert(category).await
    }

    pub async fn get_asset(&self, id: Uuid) -> Result<Option<assets::Model>> {
        self.asset_repo().get(id).await
    }

    pub async fn asset_code_exists(&self, asset_code: &str) -> Result<bool> {
        self.asset_repo().code_exists(asset_code).await
    }

    pub async fn insert_asset(&self, asset: assets::ActiveModel) -> Result<assets::Model> {
        self.asset_repo().insert(asset).await
    }

    pub async fn list_assets(&self, query: &AssetQuery) -> Result<(Vec<AssetRow>, u64)> {
        self.asset_repo().list(query).await
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    pub async fn get_assignment(&self, id: Uuid) -> Result<Option<assignments::Model>> {
        self.assignment_repo().get(id).await
    }

    pub async fn create_assignment(&self, new: NewAssignment) -> Result<assignments::Model> {
        self.assignment_repo().create(new).await
    }

    pub async fn set_assignment_state(&self, id: Uuid, state: AssignmentState) -> Result<()> {
        self.assignment_repo().set_state(id, state).await
    }

    pub async fn asset_has_other_active_assignment(
        &self,
        asset_id: Uuid,
        excluding: Uuid,
    ) -> Result<bool> {
        self.assignment_repo()
            .has_other_active(asset_id, excluding)
            .await
    }

    // ========================================================================
    // Return Requests
    // ========================================================================

    pub async fn get_return_request(&self, id: Uuid) -> Result<Option<return_requests::Model>> {
        self.return_request_repo().get(id).await
    }

    pub async fn get_return_request_with_assignment(
        &self,
        id: Uuid,
    ) -> Result<Option<(return_requests::Model, assignments::Model)>> {
        self.return_request_repo().get_with_assignment(id).await
    }

    pub async fn has_open_return_request(&self, assignment_id: Uuid) -> Result<bool> {
        self.return_request_repo()
            .has_open_request(assignment_id)
            .await
    }

    pub async fn create_return_request(
        &self,
        assignment_id: Uuid,
        requested_by: Uuid,
    ) -> Result<return_requests::Model> {
        self.return_request_repo()
            .create(assignment_id, requested_by)
            .await
    }

    pub async fn complete_return_request(
        &self,
        request_id: Uuid,
        assignment: &assignments::Model,
        accepted_by: Uuid,
        return_date: NaiveDate,
    ) -> Result<()> {
        self.return_request_repo()
            .complete(request_id, assignment, accepted_by, return_date)
            .await
    }

    pub async fn cancel_return_request(&self, request_id: Uuid, assignment_id: Uuid) -> Result<()> {
        self.return_request_repo()
            .cancel(request_id, assignment_id)
            .await
    }

    pub async fn list_return_requests(
        &self,
        query: &ReturnRequestQuery,
    ) -> Result<(Vec<ReturnRequestRow>, u64)> {
        self.return_request_repo().list(query).await
    }
}
