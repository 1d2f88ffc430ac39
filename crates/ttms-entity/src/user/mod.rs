//! User domain entities.

pub mod identity;
pub mod model;
pub mod role;

pub use identity::Identity;
pub use model::User;
pub use role::UserRole;
