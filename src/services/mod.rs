pub mod asset_service;
pub mod asset_service_impl;
pub use asset_service::{
    AssetDto, AssetError, AssetFilter, AssetService, CategoryDto, CreateAssetRequest,
    CreateCategoryRequest,
};
pub use asset_service_impl::SeaOrmAssetService;

pub mod assignment_service;
pub mod assignment_service_impl;
pub use assignment_service::{
    AssignmentDto, AssignmentError, AssignmentService, CreateAssignmentRequest,
};
pub use assignment_service_impl::SeaOrmAssignmentService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, CurrentUser, LoginResult};
pub use auth_service_impl::SeaOrmAuthService;

pub mod return_request_service;
pub mod return_request_service_impl;
pub use return_request_service::{
    CreatedReturnRequest, ReturnRequestDto, ReturnRequestError, ReturnRequestFilter,
    ReturnRequestService,
};
pub use return_request_service_impl::SeaOrmReturnRequestService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{
    REGISTRATION_FAILED, RegisterUserRequest, RegisteredUser, UserError, UserListItem,
    UserService,
};
pub use user_service_impl::SeaOrmUserService;
