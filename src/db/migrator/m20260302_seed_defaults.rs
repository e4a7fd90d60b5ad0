use chrono::NaiveDate;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Set};

use crate::config::SecurityConfig;
use crate::constants::{roles, seed, staff};
use crate::crypto::CryptographyHelper;
use crate::entities::enums::{Gender, UserStatus};
use crate::entities::{locations, prelude::*, roles as role_entity, users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let location_rows = [
            (seed::HCM_LOCATION_ID, "HCM", "Ho Chi Minh"),
            (seed::HN_LOCATION_ID, "HN", "Ha Noi"),
            (seed::DN_LOCATION_ID, "DN", "Da Nang"),
        ]
        .into_iter()
        .map(|(id, code, name)| locations::ActiveModel {
            id: Set(id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
        });
        Locations::insert_many(location_rows).exec(db).await?;

        let role_rows = [
            (seed::ADMIN_ROLE_ID, roles::ADMIN),
            (seed::STAFF_ROLE_ID, roles::STAFF),
        ]
        .into_iter()
        .map(|(id, name)| role_entity::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
        });
        Roles::insert_many(role_rows).exec(db).await?;

        // Bootstrap admin so the first real accounts can be registered.
        let crypto = CryptographyHelper::new(SecurityConfig::default());
        let salt = crypto.generate_salt();
        let password_hash = crypto
            .hash_password(seed::ADMIN_PASSWORD, &salt)
            .map_err(|e| DbErr::Custom(format!("Failed to hash default password: {e}")))?;

        let date_of_birth = NaiveDate::from_ymd_opt(1990, 1, 1)
            .ok_or_else(|| DbErr::Custom("Invalid seed date".to_string()))?;
        let date_joined = NaiveDate::from_ymd_opt(2020, 1, 6)
            .ok_or_else(|| DbErr::Custom("Invalid seed date".to_string()))?;

        let admin = users::ActiveModel {
            id: Set(seed::ADMIN_USER_ID),
            staff_code: Set(staff::DEFAULT_STAFF_CODE.to_string()),
            username: Set(seed::ADMIN_USERNAME.to_string()),
            first_name: Set("System".to_string()),
            last_name: Set("Administrator".to_string()),
            gender: Set(Gender::Other),
            password_hash: Set(password_hash),
            password_salt: Set(salt),
            api_key: Set(seed::DEFAULT_API_KEY.to_string()),
            role_id: Set(seed::ADMIN_ROLE_ID),
            location_id: Set(seed::HCM_LOCATION_ID),
            status: Set(UserStatus::Active),
            date_of_birth: Set(date_of_birth),
            date_joined: Set(date_joined),
            is_first_login: Set(true),
            created_by: Set(None),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };
        Users::insert(admin).exec(db).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        Users::delete_by_id(seed::ADMIN_USER_ID).exec(db).await?;
        Roles::delete_many().exec(db).await?;
        Locations::delete_many().exec(db).await?;

        Ok(())
    }
}
