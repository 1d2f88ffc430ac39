//! HMAC signing secret.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use ttms_core::config::auth::{AuthConfig, SecretEncoding};
use ttms_core::error::AppError;

/// Secret bytes used to sign and verify tokens.
///
/// Loaded once at startup and shared read-only for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey([REDACTED; {} bytes])", self.0.len())
    }
}

impl SigningKey {
    /// Uses the given bytes as the key. Empty keys are rejected.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AppError::configuration("JWT secret must not be empty"));
        }
        Ok(Self(bytes))
    }

    /// Decodes a standard base64 secret.
    pub fn from_base64(encoded: &str) -> Result<Self, AppError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::configuration(format!("JWT secret is not valid base64: {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Builds the key from the `auth` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        match config.jwt_secret_encoding {
            SecretEncoding::Plain => Self::from_bytes(config.jwt_secret.as_bytes()),
            SecretEncoding::Base64 => Self::from_base64(&config.jwt_secret),
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; empty keys cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
