//! Integer-backed enumerations stored in entity columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Gender {
    #[sea_orm(num_value = 0)]
    Female,
    #[sea_orm(num_value = 1)]
    Male,
    #[sea_orm(num_value = 2)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum UserStatus {
    #[sea_orm(num_value = 1)]
    Active,
    #[sea_orm(num_value = 2)]
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum AssetStatus {
    #[sea_orm(num_value = 1)]
    Available,
    #[sea_orm(num_value = 2)]
    NotAvailable,
    #[sea_orm(num_value = 3)]
    Assigned,
    #[sea_orm(num_value = 4)]
    WaitingForRecycling,
    #[sea_orm(num_value = 5)]
    Recycled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum AssignmentState {
    #[sea_orm(num_value = 1)]
    WaitingForAcceptance,
    #[sea_orm(num_value = 2)]
    Accepted,
    #[sea_orm(num_value = 3)]
    WaitingForReturning,
    #[sea_orm(num_value = 4)]
    Returned,
}

impl AssignmentState {
    /// States in which the holder still has the asset.
    pub const ACTIVE: [Self; 2] = [Self::WaitingForAcceptance, Self::Accepted];
}

/// Lifecycle of a return request; the numeric values are the `status` filter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ReturnStatus {
    #[sea_orm(num_value = 1)]
    Requested,
    #[sea_orm(num_value = 2)]
    Completed,
    #[sea_orm(num_value = 3)]
    Cancelled,
}
