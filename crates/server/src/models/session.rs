//! Session-related types for staff authentication.

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user's profile.
    pub const CURRENT_USER: &str = "current_user";
}
