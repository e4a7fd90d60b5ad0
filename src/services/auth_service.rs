//! Domain service for authentication.
//!
//! Resolves the caller of a request from a password login, a session or an
//! API key, and rejects disabled accounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::roles;
use crate::db::User;
use crate::entities::enums::UserStatus;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    Disabled,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// The authenticated caller, attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub staff_code: String,
    pub role: String,
    pub location_id: Uuid,
}

impl CurrentUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            staff_code: user.staff_code,
            role: user.role,
            location_id: user.location_id,
        }
    }
}

/// Login result containing the caller and their API key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    #[serde(flatten)]
    pub user: CurrentUser,
    pub api_key: String,
    pub is_first_login: bool,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the caller.
    ///
    /// # Errors
    ///
    /// - Returns [`AuthError::InvalidCredentials`] for an unknown user or a wrong password
    /// - Returns [`AuthError::Disabled`] if the account is disabled
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves an API key to an active user.
    async fn verify_api_key(&self, api_key: &str) -> Result<Option<CurrentUser>, AuthError>;

    /// Reloads the user behind a session; `None` once the account is gone or disabled.
    async fn session_user(&self, user_id: Uuid) -> Result<Option<CurrentUser>, AuthError>;
}

pub(crate) fn active(user: Option<User>) -> Option<CurrentUser> {
    user.filter(|u| u.status == UserStatus::Active)
        .map(CurrentUser::from)
}
