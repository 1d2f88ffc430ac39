//! Command definitions and dispatch.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use ttms_auth::jwt::ROLE_CLAIM;
use ttms_auth::{
    AuthService, ClaimSet, MemoryUserStore, PasswordHasher, RequestAuthenticator, TokenService,
    UserStore, seed_admin,
};
use ttms_core::config::AppConfig;
use ttms_core::error::AppError;
use ttms_entity::user::{User, UserRole};

/// TTMS: issue, inspect, and validate session tokens
#[derive(Debug, Parser)]
#[command(name = "ttms", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue a token for a username
    Issue {
        /// Token subject
        #[arg(short, long)]
        username: String,
        /// Add a role claim
        #[arg(short, long)]
        role: Option<UserRole>,
        /// Extra claim as `name=value`; JSON values are parsed, anything else is a string
        #[arg(long = "claim", value_parser = parse_claim)]
        claims: Vec<(String, Value)>,
        /// Lifetime in milliseconds; negative values issue an expired token
        #[arg(long, allow_hyphen_values = true)]
        ttl_ms: Option<i64>,
    },
    /// Print the subject of a token
    Subject {
        /// The token
        token: String,
    },
    /// Check a token against a username
    Validate {
        /// The token
        token: String,
        /// Expected subject
        #[arg(short, long)]
        username: String,
    },
    /// Log in against the seeded user store
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Resolve an `Authorization` header value against the seeded user store
    Authorize {
        /// Header value, e.g. `Bearer eyJ...`
        header: String,
    },
}

impl Cli {
    /// Execute the selected command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let tokens = Arc::new(TokenService::from_config(&config.auth)?);

        let output = match &self.command {
            Command::Issue {
                username,
                role,
                claims,
                ttl_ms,
            } => {
                let mut claim_set: ClaimSet = claims.iter().cloned().collect();
                if let Some(role) = role {
                    claim_set.insert(ROLE_CLAIM.to_string(), Value::from(role.as_str()));
                }
                let identity = User::new(username.clone(), "", role.unwrap_or(UserRole::Client));
                let token = tokens.issue_with_claims(Some(&claim_set), Some(&identity), *ttl_ms)?;
                json!({ "token": token })
            }
            Command::Subject { token } => {
                let subject = tokens.extract_subject(Some(token))?;
                json!({ "subject": subject })
            }
            Command::Validate { token, username } => {
                let identity = User::new(username.clone(), "", UserRole::Client);
                let valid = tokens.is_valid(Some(token), &identity)?;
                json!({ "valid": valid })
            }
            Command::Login { username, password } => {
                let (users, hasher) = seeded_store(&config).await?;
                let service = AuthService::new(tokens.clone(), users, hasher);
                serde_json::to_value(service.login(username, password).await?)?
            }
            Command::Authorize { header } => {
                let (users, _) = seeded_store(&config).await?;
                let authenticator = RequestAuthenticator::new(tokens.clone(), users);
                let authenticated = authenticator.authenticate(Some(header)).await?;
                json!({
                    "user": authenticated.user,
                    "claims": authenticated.claims,
                })
            }
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// Builds the in-memory user store holding the configured admin account.
async fn seeded_store(
    config: &AppConfig,
) -> Result<(Arc<dyn UserStore>, PasswordHasher), AppError> {
    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let hasher = PasswordHasher::new();
    seed_admin(users.as_ref(), &hasher, &config.auth).await?;
    Ok((users, hasher))
}

/// Parses `name=value`, treating `value` as JSON when it parses as JSON.
fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err("claim name must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim() {
        assert_eq!(
            parse_claim("team=support").unwrap(),
            ("team".to_string(), json!("support"))
        );
        assert_eq!(
            parse_claim("tickets=[1,2]").unwrap(),
            ("tickets".to_string(), json!([1, 2]))
        );
        assert_eq!(
            parse_claim("note=a=b").unwrap(),
            ("note".to_string(), json!("a=b"))
        );
        assert!(parse_claim("novalue").is_err());
        assert!(parse_claim("=x").is_err());
    }

    #[test]
    fn test_cli_parses_issue() {
        let cli = Cli::try_parse_from([
            "ttms",
            "issue",
            "--username",
            "atchah",
            "--role",
            "agent",
            "--claim",
            "team=support",
            "--ttl-ms",
            "-1000",
        ])
        .unwrap();

        match cli.command {
            Command::Issue {
                username,
                role,
                claims,
                ttl_ms,
            } => {
                assert_eq!(username, "atchah");
                assert_eq!(role, Some(UserRole::Agent));
                assert_eq!(claims, vec![("team".to_string(), json!("support"))]);
                assert_eq!(ttl_ms, Some(-1000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn config_without_admin() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.admin_username = String::new();
        config
    }

    #[tokio::test]
    async fn test_token_commands_skip_account_seeding() {
        let cli = Cli::try_parse_from(["ttms", "issue", "--username", "atchah"]).unwrap();
        cli.execute(config_without_admin()).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_seeds_accounts() {
        let cli = Cli::try_parse_from(["ttms", "login", "-u", "Admin", "-p", "x"]).unwrap();
        let err = cli.execute(config_without_admin()).await.unwrap_err();
        assert_eq!(err.kind, ttms_core::error::ErrorKind::Configuration);
    }
}
