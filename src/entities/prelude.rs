pub use super::assets::Entity as Assets;
pub use super::assignments::Entity as Assignments;
pub use super::categories::Entity as Categories;
pub use super::locations::Entity as Locations;
pub use super::return_requests::Entity as ReturnRequests;
pub use super::roles::Entity as Roles;
pub use super::users::Entity as Users;
