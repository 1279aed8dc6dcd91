//! Core types for Hotel Desk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod enums;
pub mod id;
pub mod order_number;

pub use enums::*;
pub use id::*;
pub use order_number::OrderNumber;
