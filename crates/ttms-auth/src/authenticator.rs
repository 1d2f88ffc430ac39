//! Bearer-token authentication for incoming requests.

use std::sync::Arc;

use ttms_core::error::AppError;
use ttms_entity::user::User;

use crate::jwt::{Claims, TokenService};
use crate::store::UserStore;

/// The identity behind an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The resolved user record.
    pub user: User,
    /// The verified token payload.
    pub claims: Claims,
}

/// Turns an `Authorization` header into an [`AuthenticatedUser`].
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
}

impl RequestAuthenticator {
    /// Creates a new authenticator.
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Authenticates a request from its `Authorization` header value.
    ///
    /// Every failure is an `Authentication` error except an absent token
    /// argument, which surfaces as `Validation`.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, AppError> {
        let header =
            authorization.ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = self.tokens.extract_claims(Some(token))?;

        let user = self
            .users
            .find_by_username(claims.subject())
            .await?
            .ok_or_else(|| {
                tracing::debug!(subject = %claims.sub, "Token subject has no account");
                AppError::authentication("Unknown token subject")
            })?;

        if claims.subject() != user.username {
            tracing::debug!(
                subject = %claims.sub,
                username = %user.username,
                "Token subject does not match account"
            );
            return Err(AppError::authentication("Token subject does not match account"));
        }

        Ok(AuthenticatedUser { user, claims })
    }
}
