//! Domain primitives for the asset desk.
//!
//! Pure logic with no database access: staff-code and username generation,
//! registration date rules, and the enumerated sort keys used by the listings.

pub mod registration;
pub mod sorting;
pub mod staff;

pub use registration::{RegistrationRuleError, check_registration_dates, default_password};
pub use sorting::{AssetSortKey, ReturnRequestSortKey, SortOrder, UserSortKey};
pub use staff::{
    InitialsFormatter, StaffCodeError, UsernameFormatter, disambiguate_username, next_staff_code,
};
