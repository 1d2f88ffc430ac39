//! Shared test helpers for integration tests.

use std::sync::Arc;

use ttms_auth::{
    AuthService, MemoryUserStore, PasswordHasher, RequestAuthenticator, TokenService, UserStore,
    seed_admin,
};
use ttms_core::config::AppConfig;
use ttms_entity::user::{User, UserRole};

/// Test application context
pub struct TestApp {
    /// Token issuance and validation
    pub tokens: Arc<TokenService>,
    /// User lookup
    pub users: Arc<dyn UserStore>,
    /// Credential login
    pub auth: AuthService,
    /// Bearer header authentication
    pub authenticator: RequestAuthenticator,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with a seeded admin account
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret =
            "integration-test-secret-long-enough-for-a-sixty-four-byte-digest".to_string();
        config.auth.admin_password = "ttmssmtt-2023".to_string();

        let tokens = Arc::new(
            TokenService::from_config(&config.auth).expect("Failed to build token service"),
        );
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let hasher = PasswordHasher::new();

        seed_admin(users.as_ref(), &hasher, &config.auth)
            .await
            .expect("Failed to seed admin");

        let auth = AuthService::new(Arc::clone(&tokens), Arc::clone(&users), hasher);
        let authenticator = RequestAuthenticator::new(Arc::clone(&tokens), Arc::clone(&users));

        Self {
            tokens,
            users,
            auth,
            authenticator,
            config,
        }
    }

    /// Create a test user
    pub async fn create_test_user(&self, username: &str, password: &str, role: UserRole) -> User {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        self.users
            .save(User::new(username, hash, role))
            .await
            .expect("Failed to create user")
    }

    /// Login and return a bearer header value
    pub async fn login(&self, username: &str, password: &str) -> String {
        let issued = self
            .auth
            .login(username, password)
            .await
            .expect("Login failed");
        format!("{} {}", issued.token_type, issued.access_token)
    }
}
