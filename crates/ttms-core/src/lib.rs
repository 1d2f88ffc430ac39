//! # ttms-core
//!
//! Core crate for the TTMS ticketing backend. Contains the unified error
//! system, configuration schemas, and the clock abstraction used by token
//! validation.
//!
//! This crate has **no** internal dependencies on other TTMS crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
