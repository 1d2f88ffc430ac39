//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate: a base TOML file, an
//! optional per-environment overlay, then environment variables prefixed
//! with `TTMS__`. Every section has defaults so a missing file still yields
//! a usable configuration.

pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token signing and admin seeding settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `path` (without extension, e.g. `config/default`), the
    /// `config/{env}` overlay, and `TTMS__SECTION__KEY` environment
    /// variables, in that order of increasing precedence.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        tracing::debug!(path, env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TTMS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::auth::{SecretEncoding, TokenAlgorithm};

    #[test]
    fn test_missing_files_yield_defaults() {
        let config = AppConfig::load("config/does-not-exist", "nowhere").unwrap();
        assert_eq!(config.auth.token_ttl_minutes, 1440);
        assert_eq!(config.auth.jwt_algorithm, TokenAlgorithm::HS512);
        assert_eq!(config.auth.jwt_secret_encoding, SecretEncoding::Plain);
        assert_eq!(config.auth.admin_username, "Admin");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_source_keeps_other_defaults() {
        let parsed: AppConfig = from_json(
            r#"{"auth": {"jwt_secret": "s3cr3t", "jwt_algorithm": "HS256"}}"#,
        );
        assert_eq!(parsed.auth.jwt_secret, "s3cr3t");
        assert_eq!(parsed.auth.jwt_algorithm, TokenAlgorithm::HS256);
        assert_eq!(parsed.auth.token_ttl_minutes, 1440);
        assert_eq!(parsed.logging.format, "json");
    }

    fn from_json(json: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
