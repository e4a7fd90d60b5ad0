//! Sort direction and the enumerated sort keys accepted by the listings.
//!
//! Unknown keys fall back to each listing's default column rather than
//! failing, matching what clients already send.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Ascending exactly when `param` is `asc` in any case; anything else sorts descending.
    #[must_use]
    pub fn from_param(param: &str) -> Self {
        if param.eq_ignore_ascii_case("asc") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnRequestSortKey {
    #[default]
    AssetCode,
    AssetName,
    RequestedBy,
    AssignedDate,
    AcceptedBy,
    ReturnedDate,
    State,
}

impl ReturnRequestSortKey {
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("AssetName") => Self::AssetName,
            Some("RequestedBy") => Self::RequestedBy,
            Some("AssignedDate") => Self::AssignedDate,
            Some("AcceptedBy") => Self::AcceptedBy,
            Some("ReturnedDate") => Self::ReturnedDate,
            Some("State") => Self::State,
            _ => Self::AssetCode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortKey {
    #[default]
    StaffCode,
    FullName,
    Username,
    JoinedDate,
    Role,
}

impl UserSortKey {
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("FullName") => Self::FullName,
            Some("Username") => Self::Username,
            Some("JoinedDate") => Self::JoinedDate,
            Some("Role" | "Type") => Self::Role,
            _ => Self::StaffCode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetSortKey {
    #[default]
    AssetCode,
    AssetName,
    Category,
    State,
}

impl AssetSortKey {
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("AssetName") => Self::AssetName,
            Some("Category") => Self::Category,
            Some("State") => Self::State,
            _ => Self::AssetCode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_is_ascending_only_for_asc() {
        assert!(SortOrder::from_param("asc").is_ascending());
        assert!(SortOrder::from_param("ASC").is_ascending());
        assert!(!SortOrder::from_param("desc").is_ascending());
        assert!(!SortOrder::from_param("").is_ascending());
        assert!(!SortOrder::from_param("ascending").is_ascending());
    }

    #[test]
    fn return_request_keys_fall_back_to_asset_code() {
        assert_eq!(
            ReturnRequestSortKey::from_param(Some("AssetName")),
            ReturnRequestSortKey::AssetName
        );
        assert_eq!(
            ReturnRequestSortKey::from_param(Some("ReturnedDate")),
            ReturnRequestSortKey::ReturnedDate
        );
        assert_eq!(
            ReturnRequestSortKey::from_param(Some("assetname")),
            ReturnRequestSortKey::AssetCode
        );
        assert_eq!(ReturnRequestSortKey::from_param(None), ReturnRequestSortKey::AssetCode);
    }

    #[test]
    fn user_and_asset_keys_have_defaults() {
        assert_eq!(UserSortKey::from_param(Some("bogus")), UserSortKey::StaffCode);
        assert_eq!(UserSortKey::from_param(Some("FullName")), UserSortKey::FullName);
        assert_eq!(AssetSortKey::from_param(None), AssetSortKey::AssetCode);
        assert_eq!(AssetSortKey::from_param(Some("Category")), AssetSortKey::Category);
    }
}
