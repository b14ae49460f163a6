//! Data models for notevault.
//!
//! Defines the records held in the three collections (users, notes, shared
//! links) and the input types used to create or change them.

mod note;
mod shared_link;
mod user;

pub use note::*;
pub use shared_link::*;
pub use user::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
