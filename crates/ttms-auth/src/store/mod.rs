//! User lookup for the request-authorization layer.

pub mod memory;

use async_trait::async_trait;

use ttms_core::result::AppResult;
use ttms_entity::user::User;

pub use memory::MemoryUserStore;

/// Resolves verified token subjects back into full user records.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user, replacing any existing user with the same username.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Count stored users.
    async fn count(&self) -> AppResult<u64>;
}
