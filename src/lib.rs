//! notevault - authenticated note-taking service
//!
//! Users sign up, log in with bearer tokens, keep private notes with
//! soft-delete and versioning, and publish read-only share links.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
