//! Token operation errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

use ttms_core::error::{AppError, ErrorKind};

/// Failures of [`TokenService`](super::TokenService) operations.
///
/// Expiry is reported as an error rather than a `false` validation
/// result; a subject mismatch is the only negative validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A required argument was absent or empty.
    #[error("missing required argument: {argument}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// A supplied argument cannot be represented.
    #[error("argument out of range: {argument}")]
    OutOfRange {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// The token could not be parsed or its signature did not verify.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The token's expiration has passed.
    #[error("token expired at {expired_at}")]
    Expired {
        /// The expiration recorded in the token.
        expired_at: DateTime<Utc>,
    },

    /// Encoding or signing the token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    pub(crate) fn missing(argument: &'static str) -> Self {
        Self::InvalidArgument { argument }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let (kind, message) = match &err {
            TokenError::InvalidArgument { .. } | TokenError::OutOfRange { .. } => {
                (ErrorKind::Validation, err.to_string())
            }
            TokenError::Malformed(_) => (ErrorKind::Authentication, "Invalid token".to_string()),
            TokenError::Expired { .. } => {
                (ErrorKind::Authentication, "Token has expired".to_string())
            }
            TokenError::Signing(_) => (ErrorKind::Internal, "Failed to issue token".to_string()),
        };
        AppError::with_source(kind, message, err)
    }
}
