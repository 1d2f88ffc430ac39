//! The read-only view of a user that token issuance needs.

use super::role::UserRole;

/// Anything that can be the subject of a token.
///
/// The username is the token subject and must be non-empty and unique
/// within the user store.
pub trait Identity {
    /// Unique login name.
    fn username(&self) -> &str;

    /// Role carried in role claims.
    fn role(&self) -> UserRole;
}
