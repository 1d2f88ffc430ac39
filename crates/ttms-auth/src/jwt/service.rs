//! Token issuance and validation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;

use ttms_core::clock::{Clock, SystemClock};
use ttms_core::config::auth::{AuthConfig, TokenAlgorithm};
use ttms_core::error::AppError;
use ttms_entity::user::Identity;

use super::claims::{ClaimSet, Claims, REGISTERED_CLAIMS};
use super::error::TokenError;
use super::key::SigningKey;

/// Issues and validates HMAC-signed compact tokens (`header.payload.signature`).
///
/// Holds only the immutable key material, the default lifetime, and a
/// clock, so a single instance can be shared freely across threads.
#[derive(Clone)]
pub struct TokenService {
    /// Key used to sign new tokens.
    encoding_key: EncodingKey,
    /// Key used to verify signatures.
    decoding_key: DecodingKey,
    /// HMAC variant written into the header and required on decode.
    algorithm: Algorithm,
    /// Signature and structure checks; expiry is checked against `clock`.
    validation: Validation,
    /// Lifetime applied when the caller gives no TTL.
    default_ttl: Duration,
    /// Time source for `iat`, `exp`, and expiry checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenService {
    /// Creates a service signing with `key` and reading time from the system clock.
    pub fn new(key: &SigningKey, algorithm: TokenAlgorithm, default_ttl: Duration) -> Self {
        let algorithm = match algorithm {
            TokenAlgorithm::HS256 => Algorithm::HS256,
            TokenAlgorithm::HS384 => Algorithm::HS384,
            TokenAlgorithm::HS512 => Algorithm::HS512,
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm,
            validation,
            default_ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a service from the `auth` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let key = SigningKey::from_config(config)?;
        if key.len() < config.jwt_algorithm.digest_len() {
            tracing::warn!(
                key_len = key.len(),
                recommended = config.jwt_algorithm.digest_len(),
                "JWT secret is shorter than the digest size of {:?}",
                config.jwt_algorithm
            );
        }

        let ttl_minutes = i64::try_from(config.token_ttl_minutes)
            .map_err(|_| AppError::configuration("token_ttl_minutes is out of range"))?;

        let ttl = Duration::try_minutes(ttl_minutes)
            .ok_or_else(|| AppError::configuration("token_ttl_minutes is out of range"))?;

        Ok(Self::new(&key, config.jwt_algorithm, ttl))
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Default token lifetime.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token for `identity` with no extra claims and the default lifetime.
    pub fn issue<I>(&self, identity: Option<&I>) -> Result<String, TokenError>
    where
        I: Identity + ?Sized,
    {
        self.issue_with_claims(Some(&ClaimSet::new()), identity, None)
    }

    /// Issues a token carrying `claims` for `identity`.
    ///
    /// `ttl_millis` overrides the default lifetime; a negative value yields
    /// a token that is already expired. Caller claims named `sub`, `iat`, or
    /// `exp` are discarded.
    pub fn issue_with_claims<I>(
        &self,
        claims: Option<&ClaimSet>,
        identity: Option<&I>,
        ttl_millis: Option<i64>,
    ) -> Result<String, TokenError>
    where
        I: Identity + ?Sized,
    {
        let claims = claims.ok_or(TokenError::missing("claims"))?;
        let identity = identity.ok_or(TokenError::missing("identity"))?;
        if identity.username().is_empty() {
            return Err(TokenError::missing("identity.username"));
        }

        let mut extra = claims.clone();
        for name in REGISTERED_CLAIMS {
            if extra.remove(name).is_some() {
                tracing::debug!(claim = name, "Discarding caller-supplied registered claim");
            }
        }

        let now = self.clock.now();
        let ttl = match ttl_millis {
            Some(ms) => Duration::try_milliseconds(ms).ok_or(TokenError::OutOfRange {
                argument: "ttl_millis",
            })?,
            None => self.default_ttl,
        };
        let exp = now.checked_add_signed(ttl).ok_or(TokenError::OutOfRange {
            argument: "ttl_millis",
        })?;

        let payload = Claims {
            sub: identity.username().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            extra,
        };

        let token = encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(
            subject = %payload.sub,
            expires_at = %payload.expires_at(),
            claims = payload.extra.len(),
            "Issued token"
        );

        Ok(token)
    }

    /// Returns the subject of a verified, unexpired token.
    pub fn extract_subject(&self, token: Option<&str>) -> Result<String, TokenError> {
        Ok(self.extract_claims(token)?.sub)
    }

    /// Returns the expiration of a verified, unexpired token.
    pub fn extract_expiration(&self, token: Option<&str>) -> Result<DateTime<Utc>, TokenError> {
        Ok(self.extract_claims(token)?.expires_at())
    }

    /// Returns one claim of a verified, unexpired token.
    pub fn extract_claim(
        &self,
        token: Option<&str>,
        name: &str,
    ) -> Result<Option<Value>, TokenError> {
        Ok(self.extract_claims(token)?.get(name))
    }

    /// Verifies the signature and expiry of `token` and returns its payload.
    ///
    /// # Errors
    /// - [`TokenError::InvalidArgument`] if `token` is absent or blank
    /// - [`TokenError::Malformed`] if it does not parse or verify
    /// - [`TokenError::Expired`] if its expiration has passed
    pub fn extract_claims(&self, token: Option<&str>) -> Result<Claims, TokenError> {
        let token = token.ok_or(TokenError::missing("token"))?;
        if token.trim().is_empty() {
            return Err(TokenError::missing("token"));
        }

        let claims = self.verify(token)?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired {
                expired_at: claims.expires_at(),
            });
        }
        Ok(claims)
    }

    /// Checks that `token` verifies, has not expired, and names `identity`
    /// as its subject.
    ///
    /// A subject mismatch yields `Ok(false)`; an expired token is an
    /// [`TokenError::Expired`] error.
    pub fn is_valid<I>(&self, token: Option<&str>, identity: &I) -> Result<bool, TokenError>
    where
        I: Identity + ?Sized,
    {
        let claims = self.extract_claims(token)?;
        Ok(claims.sub == identity.username())
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                JwtErrorKind::InvalidSignature => "signature does not match".to_string(),
                JwtErrorKind::InvalidToken => "not a compact token".to_string(),
                JwtErrorKind::InvalidAlgorithm => "unexpected signing algorithm".to_string(),
                JwtErrorKind::MissingRequiredClaim(claim) => format!("missing claim '{claim}'"),
                _ => e.to_string(),
            };
            tracing::debug!(error = %e, "Token verification failed");
            TokenError::Malformed(reason)
        })?;
        Ok(data.claims)
    }
}
