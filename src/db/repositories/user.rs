use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::db::query::{ConditionBuilder, contains_pattern, order_of, search_term};
use crate::domain::{SortOrder, UserSortKey};
use crate::entities::enums::{Gender, UserStatus};
use crate::entities::{prelude::*, roles, users};

/// User data returned from repository (without password hash or salt)
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub staff_code: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub role_id: Uuid,
    pub role: String,
    pub location_id: Uuid,
    pub status: UserStatus,
    pub date_of_birth: NaiveDate,
    pub date_joined: NaiveDate,
    pub is_first_login: bool,
    pub api_key: String,
    pub created_at: String,
}

impl User {
    fn from_parts(model: users::Model, role: Option<roles::Model>) -> Self {
        Self {
            id: model.id,
            staff_code: model.staff_code,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            role_id: model.role_id,
            role: role.map(|r| r.name).unwrap_or_default(),
            location_id: model.location_id,
            status: model.status,
            date_of_birth: model.date_of_birth,
            date_joined: model.date_joined,
            is_first_login: model.is_first_login,
            api_key: model.api_key,
            created_at: model.created_at,
        }
    }
}

/// Filters for the user search listing.
#[derive(Debug, Clone)]
pub struct UserSearch {
    pub location_id: Uuid,
    pub search_term: Option<String>,
    pub role: Option<String>,
    pub sort_by: UserSortKey,
    pub sort_order: SortOrder,
    /// Zero-based
    pub page_index: u64,
    pub page_size: u64,
}

/// Row of the user search listing.
#[derive(Debug, Clone, FromQueryResult)]
pub struct UserRow {
    pub id: Uuid,
    pub staff_code: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub date_joined: NaiveDate,
    pub location_id: Uuid,
    pub role: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .find_also_related(Roles)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(|(u, r)| User::from_parts(u, r)))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .find_also_related(Roles)
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(|(u, r)| User::from_parts(u, r)))
    }

    /// Get user by username together with the stored password hash
    pub async fn get_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .find_also_related(Roles)
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(|(u, r)| {
            let password_hash = u.password_hash.clone();
            (User::from_parts(u, r), password_hash)
        }))
    }

    /// Verify API key and return the associated user
    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .find_also_related(Roles)
            .one(&self.conn)
            .await
            .context("Failed to query user by API key")?;

        Ok(user.map(|(u, r)| User::from_parts(u, r)))
    }

    pub async fn get_role(&self, role_id: Uuid) -> Result<Option<roles::Model>> {
        Roles::find_by_id(role_id)
            .one(&self.conn)
            .await
            .context("Failed to query role")
    }

    /// Greatest staff code in string order.
    pub async fn latest_staff_code(&self) -> Result<Option<String>> {
        Users::find()
            .select_only()
            .column(users::Column::StaffCode)
            .order_by_desc(users::Column::StaffCode)
            .into_tuple::<String>()
            .one(&self.conn)
            .await
            .context("Failed to query latest staff code")
    }

    pub async fn usernames_starting_with(&self, base: &str) -> Result<Vec<String>> {
        Users::find()
            .select_only()
            .column(users::Column::Username)
            .filter(users::Column::Username.starts_with(base))
            .into_tuple::<String>()
            .all(&self.conn)
            .await
            .context("Failed to query usernames")
    }

    pub async fn insert(&self, user: users::ActiveModel) -> Result<users::Model> {
        user.insert(&self.conn)
            .await
            .context("Failed to insert user")
    }

    pub async fn set_status(&self, id: Uuid, status: UserStatus) -> Result<()> {
        users::ActiveModel {
            id: Set(id),
            status: Set(status),
            ..Default::default()
        }
        .update(&self.conn)
        .await
        .context("Failed to update user status")?;

        Ok(())
    }

    /// Active users of one location, filtered, sorted and paged.
    pub async fn search(&self, search: &UserSearch) -> Result<(Vec<UserRow>, u64)> {
        let condition = ConditionBuilder::new()
            .and(users::Column::LocationId.eq(search.location_id))
            .and(users::Column::Status.eq(UserStatus::Active))
            .and_if(search_term(search.search_term.as_deref()), |term| {
                Condition::any()
                    .add(users::Column::StaffCode.like(contains_pattern(term)))
                    .add(users::Column::Username.like(contains_pattern(term)))
                    .add(users::Column::FirstName.like(contains_pattern(term)))
                    .add(users::Column::LastName.like(contains_pattern(term)))
            })
            .and_if(search.role.as_deref(), |role| {
                Expr::expr(Func::lower(Expr::col((Roles, roles::Column::Name))))
                    .eq(role.to_lowercase())
            })
            .build();

        let order = order_of(search.sort_order);
        let query = Users::find()
            .select_only()
            .columns([
                users::Column::Id,
                users::Column::StaffCode,
                users::Column::Username,
                users::Column::FirstName,
                users::Column::LastName,
                users::Column::Gender,
                users::Column::DateOfBirth,
                users::Column::DateJoined,
                users::Column::LocationId,
            ])
            .column_as(roles::Column::Name, "role")
            .join(JoinType::InnerJoin, users::Relation::Role.def())
            .filter(condition);

        let query = match search.sort_by {
            UserSortKey::StaffCode => query.order_by(users::Column::StaffCode, order),
            UserSortKey::FullName => query
                .order_by(users::Column::FirstName, order.clone())
                .order_by(users::Column::LastName, order),
            UserSortKey::Username => query.order_by(users::Column::Username, order),
            UserSortKey::JoinedDate => query.order_by(users::Column::DateJoined, order),
            UserSortKey::Role => query.order_by(roles::Column::Name, order),
        }
        .order_by_asc(users::Column::StaffCode);

        let paginator = query
            .into_model::<UserRow>()
            .paginate(&self.conn, search.page_size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(search.page_index).await?;

        Ok((items, total))
    }
}
