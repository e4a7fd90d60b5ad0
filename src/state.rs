use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::crypto::CryptographyHelper;
use crate::db::Store;
use crate::domain::{InitialsFormatter, UsernameFormatter};
use crate::services::{
    AssetService, AssignmentService, AuthService, ReturnRequestService, SeaOrmAssetService,
    SeaOrmAssignmentService, SeaOrmAuthService, SeaOrmReturnRequestService, SeaOrmUserService,
    UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub return_request_service: Arc<dyn ReturnRequestService>,

    pub asset_service: Arc<dyn AssetService>,

    pub assignment_service: Arc<dyn AssignmentService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store, Arc::new(InitialsFormatter)))
    }

    /// Wires the services over an already migrated store.
    #[must_use]
    pub fn with_store(
        config: Config,
        store: Store,
        formatter: Arc<dyn UsernameFormatter>,
    ) -> Self {
        let crypto = CryptographyHelper::new(config.security.clone());

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), crypto.clone()));
        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            crypto,
            formatter,
            config.accounts.clone(),
        ));
        let return_request_service = Arc::new(SeaOrmReturnRequestService::new(
            store.clone(),
            config.accounts.clone(),
        ));
        let asset_service = Arc::new(SeaOrmAssetService::new(
            store.clone(),
            config.accounts.clone(),
        ));
        let assignment_service = Arc::new(SeaOrmAssignmentService::new(store.clone()));

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            user_service,
            return_request_service,
            asset_service,
            assignment_service,
        }
    }
}
