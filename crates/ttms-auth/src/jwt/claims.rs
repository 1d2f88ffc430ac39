//! Token payload structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied claims merged into a token payload.
pub type ClaimSet = Map<String, Value>;

/// Claim carrying the account role label in tokens issued at login.
pub const ROLE_CLAIM: &str = "role";

/// Claim names owned by the token service. Caller claims with these names
/// are dropped at issuance.
pub(crate) const REGISTERED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Decoded, signature-verified token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued for.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Every other claim, exactly as supplied at issuance.
    #[serde(flatten)]
    pub extra: ClaimSet,
}

impl Claims {
    /// Returns the subject (username).
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// Whether the token is expired at `now`. A token is expired from the
    /// second named by `exp` onward.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Looks up a claim by name, registered claims included.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "sub" => Some(Value::from(self.sub.as_str())),
            "iat" => Some(Value::from(self.iat)),
            "exp" => Some(Value::from(self.exp)),
            _ => self.extra.get(name).cloned(),
        }
    }

    /// Returns the role label, if the token carries one.
    pub fn role(&self) -> Option<&str> {
        self.extra.get(ROLE_CLAIM).and_then(Value::as_str)
    }
}

fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
