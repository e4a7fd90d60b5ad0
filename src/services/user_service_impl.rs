//! `SeaORM` implementation of the `UserService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::Set;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AccountsConfig;
use crate::crypto::{CryptographyHelper, generate_api_key};
use crate::db::{Store, UserSearch};
use crate::domain::{
    UsernameFormatter, check_registration_dates, default_password, disambiguate_username,
    next_staff_code,
};
use crate::entities::enums::UserStatus;
use crate::entities::users;
use crate::services::user_service::{
    REGISTRATION_FAILED, RegisterUserRequest, RegisteredUser, UserError, UserListItem,
    UserService,
};

pub struct SeaOrmUserService {
    store: Store,
    crypto: CryptographyHelper,
    formatter: Arc<dyn UsernameFormatter>,
    accounts: AccountsConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub fn new(
        store: Store,
        crypto: CryptographyHelper,
        formatter: Arc<dyn UsernameFormatter>,
        accounts: AccountsConfig,
    ) -> Self {
        Self {
            store,
            crypto,
            formatter,
            accounts,
        }
    }

    async fn next_username(&self, first_name: &str, last_name: &str) -> Result<String, UserError> {
        let base = self.formatter.base_username(first_name, last_name);
        if base.is_empty() {
            return Err(UserError::Validation(
                "First and last name must contain letters or digits".to_string(),
            ));
        }

        let taken = self.store.usernames_starting_with(&base).await?;
        Ok(disambiguate_username(&base, taken.iter().map(String::as_str)))
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register_user(
        &self,
        request: RegisterUserRequest,
        creator_id: Uuid,
        today: NaiveDate,
    ) -> Result<RegisteredUser, UserError> {
        check_registration_dates(
            request.date_of_birth,
            request.date_joined,
            today,
            self.accounts.minimum_age_years,
        )?;

        let latest = self.store.latest_staff_code().await?;
        let staff_code = next_staff_code(latest.as_deref(), &self.accounts.default_staff_code)?;
        let username = self
            .next_username(&request.first_name, &request.last_name)
            .await?;

        let password = default_password(&username, request.date_of_birth);
        let salt = self.crypto.generate_salt();
        let password_hash = self.crypto.hash_password_async(&password, &salt).await?;

        let creator = self
            .store
            .get_user(creator_id)
            .await?
            .ok_or_else(|| UserError::Validation("Creating user not found".to_string()))?;
        let role = self
            .store
            .get_role(request.role_id)
            .await?
            .ok_or_else(|| UserError::Validation("Role not found".to_string()))?;

        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            staff_code: Set(staff_code),
            username: Set(username),
            first_name: Set(request.first_name.trim().to_string()),
            last_name: Set(request.last_name.trim().to_string()),
            gender: Set(request.gender),
            password_hash: Set(password_hash),
            password_salt: Set(salt),
            api_key: Set(generate_api_key()),
            role_id: Set(role.id),
            location_id: Set(creator.location_id),
            status: Set(UserStatus::Active),
            date_of_birth: Set(request.date_of_birth),
            date_joined: Set(request.date_joined),
            is_first_login: Set(true),
            created_by: Set(Some(creator.id)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let user = self.store.insert_user(model).await.map_err(|e| {
            error!(error = ?e, "Failed to persist registered user");
            UserError::Persistence(REGISTRATION_FAILED.to_string())
        })?;

        info!(
            staff_code = %user.staff_code,
            username = %user.username,
            created_by = %creator.username,
            "User registered"
        );

        Ok(RegisteredUser {
            id: user.id,
            staff_code: user.staff_code,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            date_joined: user.date_joined,
            role: role.name,
            location_id: user.location_id,
            is_first_login: user.is_first_login,
        })
    }

    async fn search_users(
        &self,
        search: UserSearch,
    ) -> Result<(Vec<UserListItem>, u64), UserError> {
        let (rows, total) = self.store.search_users(&search).await?;
        Ok((rows.into_iter().map(UserListItem::from).collect(), total))
    }
}
