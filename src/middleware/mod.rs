//! Middleware for notevault.
//!
//! - `token_auth` - bearer token resolution for the owner-facing note routes

mod token_auth;

pub use token_auth::{require_auth, AuthUser};
