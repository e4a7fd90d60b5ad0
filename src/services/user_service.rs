//! Domain service for user registration and search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{UserRow, UserSearch};
use crate::domain::{RegistrationRuleError, StaffCodeError};
use crate::entities::enums::Gender;

/// Message reported when the new user cannot be stored.
pub const REGISTRATION_FAILED: &str = "An error occurred while registering the user.";

#[derive(Debug, Error)]
pub enum UserError {
    /// A business rule rejected the request.
    #[error("{0}")]
    Validation(String),

    /// The user passed validation but could not be stored.
    #[error("{0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<RegistrationRuleError> for UserError {
    fn from(err: RegistrationRuleError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StaffCodeError> for UserError {
    fn from(err: StaffCodeError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_joined: NaiveDate,
    pub gender: Gender,
    pub role_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub staff_code: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub date_joined: NaiveDate,
    pub role: String,
    pub location_id: Uuid,
    pub is_first_login: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: Uuid,
    pub staff_code: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub joined_date: NaiveDate,
    pub role: String,
    pub location_id: Uuid,
}

impl From<UserRow> for UserListItem {
    fn from(row: UserRow) -> Self {
        Self {
            full_name: format!("{} {}", row.first_name, row.last_name),
            id: row.id,
            staff_code: row.staff_code,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender,
            date_of_birth: row.date_of_birth,
            joined_date: row.date_joined,
            role: row.role,
            location_id: row.location_id,
        }
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Registers a user created by `creator_id`, who lends the new user their location.
    ///
    /// # Errors
    ///
    /// - Returns [`UserError::Validation`] when a date rule fails or the role is unknown
    /// - Returns [`UserError::Persistence`] when the insert fails
    async fn register_user(
        &self,
        request: RegisterUserRequest,
        creator_id: Uuid,
        today: NaiveDate,
    ) -> Result<RegisteredUser, UserError>;

    /// One page of active users plus the total match count.
    async fn search_users(
        &self,
        search: UserSearch,
    ) -> Result<(Vec<UserListItem>, u64), UserError>;
}
