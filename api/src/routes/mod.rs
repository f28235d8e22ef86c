//! Route handlers
//!
//! - `auth` - Email code login and session inspection
//! - `users` - Profile registration
//! - `manifestations` - Filing and tracking manifestations
//! - `health` - Liveness and database status

pub mod auth;
pub mod health;
pub mod manifestations;
pub mod users;
