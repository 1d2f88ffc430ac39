//! Startup seeding of the administrator account.

use ttms_core::config::auth::AuthConfig;
use ttms_core::error::AppError;
use ttms_entity::user::{User, UserRole};

use crate::password::PasswordHasher;
use crate::store::UserStore;

/// Ensures the configured admin account exists.
///
/// Returns `true` if the account was created, `false` if a user with that
/// username was already present (it is left untouched).
pub async fn seed_admin(
    store: &dyn UserStore,
    hasher: &PasswordHasher,
    config: &AuthConfig,
) -> Result<bool, AppError> {
    if config.admin_username.trim().is_empty() {
        return Err(AppError::configuration("admin_username must not be empty"));
    }

    if store.find_by_username(&config.admin_username).await?.is_some() {
        tracing::debug!(username = %config.admin_username, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hasher.hash_password(&config.admin_password)?;
    let admin = User::new(config.admin_username.clone(), password_hash, UserRole::Admin);
    store.save(admin).await?;

    tracing::info!(username = %config.admin_username, "Seeded admin account");
    Ok(true)
}
