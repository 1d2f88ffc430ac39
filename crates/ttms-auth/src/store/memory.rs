//! In-process user store backed by a concurrent map.

use async_trait::async_trait;
use dashmap::DashMap;

use ttms_core::error::AppError;
use ttms_core::result::AppResult;
use ttms_entity::user::User;

use super::UserStore;

/// `UserStore` keeping users in memory, keyed by lower-cased username.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(username: &str) -> String {
    username.to_lowercase()
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(&key(username)).map(|entry| entry.value().clone()))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        if user.username.trim().is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        self.users.insert(key(&user.username), user.clone());
        Ok(user)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}
