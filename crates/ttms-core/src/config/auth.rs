//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and admin account configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// How `jwt_secret` is encoded.
    #[serde(default)]
    pub jwt_secret_encoding: SecretEncoding,
    /// HMAC variant used to sign tokens.
    #[serde(default)]
    pub jwt_algorithm: TokenAlgorithm,
    /// Default token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Username of the account seeded at startup.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Plaintext password of the seeded account; hashed before storage.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_secret_encoding: SecretEncoding::default(),
            jwt_algorithm: TokenAlgorithm::default(),
            token_ttl_minutes: default_token_ttl(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
        }
    }
}

/// Encoding of the configured secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// The secret string's UTF-8 bytes are the key.
    #[default]
    Plain,
    /// The secret is standard base64 and decodes to the key bytes.
    Base64,
}

/// Supported HMAC signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenAlgorithm {
    /// HMAC-SHA256.
    HS256,
    /// HMAC-SHA384.
    HS384,
    /// HMAC-SHA512.
    #[default]
    HS512,
}

impl TokenAlgorithm {
    /// Digest size in bytes; secrets shorter than this weaken the MAC.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::HS256 => 32,
            Self::HS384 => 48,
            Self::HS512 => 64,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    24 * 60
}

fn default_admin_username() -> String {
    "Admin".to_string()
}

fn default_admin_password() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}
