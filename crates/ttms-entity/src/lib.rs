//! # ttms-entity
//!
//! Domain entity models for the TTMS backend. Only the user identity is
//! modeled here; tickets, contacts and the rest of the CRUD surface live
//! with the persistence layer.

pub mod user;

pub use user::{Identity, User, UserRole};
