//! Signed session tokens: issuance, parsing, and validation.

pub mod claims;
pub mod error;
pub mod key;
pub mod service;

pub use claims::{ClaimSet, Claims, ROLE_CLAIM};
pub use error::TokenError;
pub use key::SigningKey;
pub use service::TokenService;
