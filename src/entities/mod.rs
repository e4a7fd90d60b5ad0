pub mod prelude;

pub mod assets;
pub mod assignments;
pub mod categories;
pub mod enums;
pub mod locations;
pub mod return_requests;
pub mod roles;
pub mod users;
