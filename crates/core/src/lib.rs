//! Hotel Desk Core - Shared types library.
//!
//! This crate provides common types used across all Hotel Desk components:
//! - `server` - HTTP API for the front desk, kitchen and back office
//! - `cli` - Command-line tools for migrations, seeding and provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure policy arithmetic - no I/O, no
//! database access, no HTTP. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, role/status enums and the order number format
//! - [`lockout`] - Login lockout schedule and security state transitions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod lockout;
pub mod types;

pub use lockout::{LockoutSchedule, SecurityState};
pub use types::*;
