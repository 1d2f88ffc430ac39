//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a TTMS account can hold.
///
/// The role travels in tokens as a plain label; authorization decisions
/// belong to the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// System administrator; manages agents.
    Admin,
    /// Support agent working tickets.
    Agent,
    /// Customer who opens tickets.
    Client,
}

impl UserRole {
    /// Return the role as its upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Agent => "AGENT",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ttms_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "AGENT" => Ok(Self::Agent),
            "CLIENT" => Ok(Self::Client),
            _ => Err(ttms_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: ADMIN, AGENT, CLIENT"
            ))),
        }
    }
}
