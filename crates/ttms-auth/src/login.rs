//! Credential login: password check followed by token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use ttms_core::error::AppError;
use ttms_entity::user::UserRole;

use crate::jwt::{ClaimSet, ROLE_CLAIM, TokenService};
use crate::password::PasswordHasher;
use crate::store::UserStore;

/// Message shared by every credential failure, so callers cannot probe
/// which usernames exist.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// A token handed back to a client after login.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The signed token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The authenticated username.
    pub username: String,
    /// The account role, also carried in the token's role claim.
    pub role: UserRole,
}

/// Verifies credentials and issues tokens carrying the account role.
#[derive(Debug, Clone)]
pub struct AuthService {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AuthService {
    /// Creates a new login service.
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            tokens,
            users,
            hasher,
        }
    }

    /// Checks `username`/`password` and issues a token with a role claim.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::info!(username, "Login failed: unknown user");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            tracing::info!(username = %user.username, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let mut claims = ClaimSet::new();
        claims.insert(ROLE_CLAIM.to_string(), Value::from(user.role.as_str()));

        let access_token = self.tokens.issue_with_claims(Some(&claims), Some(&user), None)?;
        let expires_at = self.tokens.extract_expiration(Some(&access_token))?;

        tracing::info!(username = %user.username, role = %user.role, "Login succeeded");

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_at,
            username: user.username,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ttms_core::config::auth::TokenAlgorithm;
    use ttms_core::error::ErrorKind;
    use ttms_entity::user::User;

    use crate::jwt::SigningKey;
    use crate::store::MemoryUserStore;

    async fn setup() -> (AuthService, Arc<TokenService>) {
        let key = SigningKey::from_bytes(b"login-test-secret".to_vec()).unwrap();
        let tokens = Arc::new(TokenService::new(
            &key,
            TokenAlgorithm::HS512,
            Duration::hours(24),
        ));
        let hasher = PasswordHasher::new();
        let store = Arc::new(MemoryUserStore::new());
        store
            .save(User::new(
                "johns",
                hasher.hash_password("4567").unwrap(),
                UserRole::Agent,
            ))
            .await
            .unwrap();
        (AuthService::new(tokens.clone(), store, hasher), tokens)
    }

    #[tokio::test]
    async fn test_login_issues_token_with_role() {
        let (service, tokens) = setup().await;
        let issued = service.login("johns", "4567").await.unwrap();

        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.username, "johns");
        assert_eq!(issued.role, UserRole::Agent);

        let claims = tokens.extract_claims(Some(&issued.access_token)).unwrap();
        assert_eq!(claims.sub, "johns");
        assert_eq!(claims.role(), Some("AGENT"));
        assert_eq!(claims.expires_at(), issued.expires_at);
    }

    #[tokio::test]
    async fn test_bad_credentials_share_one_error() {
        let (service, _) = setup().await;

        let wrong_password = service.login("johns", "1234").await.unwrap_err();
        let unknown_user = service.login("nobody", "4567").await.unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::Authentication);
        assert_eq!(wrong_password.message, unknown_user.message);
        assert_eq!(unknown_user.message, INVALID_CREDENTIALS);
    }
}
