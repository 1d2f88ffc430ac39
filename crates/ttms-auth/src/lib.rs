//! # ttms-auth
//!
//! Token-based authentication for the TTMS backend.
//!
//! ## Modules
//!
//! - `jwt`: signed session token issuance, parsing, and validation
//! - `password`: Argon2id password hashing
//! - `store`: user lookup by username
//! - `seed`: startup seeding of the admin account
//! - `authenticator`: bearer header to resolved identity
//! - `login`: credential check followed by token issuance

pub mod authenticator;
pub mod jwt;
pub mod login;
pub mod password;
pub mod seed;
pub mod store;

pub use authenticator::{AuthenticatedUser, RequestAuthenticator};
pub use jwt::{ClaimSet, Claims, SigningKey, TokenError, TokenService};
pub use login::{AuthService, IssuedToken};
pub use password::PasswordHasher;
pub use seed::seed_admin;
pub use store::{MemoryUserStore, UserStore};
