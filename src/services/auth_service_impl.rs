//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::crypto::CryptographyHelper;
use crate::db::Store;
use crate::entities::enums::UserStatus;
use crate::services::auth_service::{AuthError, AuthService, CurrentUser, LoginResult, active};

pub struct SeaOrmAuthService {
    store: Store,
    crypto: CryptographyHelper,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, crypto: CryptographyHelper) -> Self {
        Self { store, crypto }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some((user, password_hash)) = self.store.get_user_with_password(username).await?
        else {
            warn!(username, "Login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .crypto
            .verify_password_async(password, &password_hash)
            .await?
        {
            warn!(username, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if user.status != UserStatus::Active {
            return Err(AuthError::Disabled);
        }

        info!(username, "User logged in");

        Ok(LoginResult {
            api_key: user.api_key.clone(),
            is_first_login: user.is_first_login,
            user: CurrentUser::from(user),
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<CurrentUser>, AuthError> {
        Ok(active(self.store.verify_api_key(api_key).await?))
    }

    async fn session_user(&self, user_id: Uuid) -> Result<Option<CurrentUser>, AuthError> {
        Ok(active(self.store.get_user(user_id).await?))
    }
}
