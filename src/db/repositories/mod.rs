pub mod asset;
pub mod assignment;
pub mod category;
pub mod return_request;
pub mod user;
