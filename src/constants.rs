pub mod staff {

    pub const STAFF_CODE_PREFIX: &str = "SD";

    pub const DEFAULT_STAFF_CODE: &str = "SD0001";

    pub const MINIMUM_AGE_YEARS: u32 = 18;

    /// `{username}@{ddMMyyyy}` date part of the default password.
    pub const PASSWORD_DATE_FORMAT: &str = "%d%m%Y";

    pub const MAX_NAME_LENGTH: usize = 50;
}

pub mod roles {

    pub const ADMIN: &str = "Admin";

    pub const STAFF: &str = "Staff";
}

pub mod seed {
    use uuid::Uuid;

    pub const ADMIN_ROLE_ID: Uuid = Uuid::from_u128(0x5f1c_0a2e_0000_4000_8000_0000_0000_0001);

    pub const STAFF_ROLE_ID: Uuid = Uuid::from_u128(0x5f1c_0a2e_0000_4000_8000_0000_0000_0002);

    pub const HCM_LOCATION_ID: Uuid = Uuid::from_u128(0x7a3d_91b4_0000_4000_8000_0000_0000_0001);

    pub const HN_LOCATION_ID: Uuid = Uuid::from_u128(0x7a3d_91b4_0000_4000_8000_0000_0000_0002);

    pub const DN_LOCATION_ID: Uuid = Uuid::from_u128(0x7a3d_91b4_0000_4000_8000_0000_0000_0003);

    pub const ADMIN_USER_ID: Uuid = Uuid::from_u128(0x2c8e_44f0_0000_4000_8000_0000_0000_0001);

    pub const ADMIN_USERNAME: &str = "admin";

    /// Default password of the bootstrap admin; rotate after first login.
    pub const ADMIN_PASSWORD: &str = "password";

    /// API key of the bootstrap admin (regenerate in production).
    pub const DEFAULT_API_KEY: &str = "assetdesk_default_api_key_please_regenerate";
}

pub mod paging {

    pub const DEFAULT_PAGE_SIZE: u64 = 15;

    pub const MAX_PAGE_SIZE: u64 = 100;
}

pub mod session {

    pub const USER_KEY: &str = "user";
}
