//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Username/password login with escalating lockout
//! - `sequence` - Atomic order number minting

pub mod auth;
pub mod sequence;

pub use auth::{AttemptOutcome, AuthError, AuthService, LoginStore, PgLoginStore};
pub use sequence::{SequenceGenerator, SequenceStore};
