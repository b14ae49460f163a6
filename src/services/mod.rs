//! Service layer for notevault.
//!
//! Contains the business logic behind the HTTP routes:
//! - Password (Argon2id hashing)
//! - Token (signed bearer tokens)
//! - Auth (signup, login, token resolution)
//! - Notes (owner-scoped note lifecycle)
//! - Shares (public share links)

mod auth;
mod notes;
pub(crate) mod password;
mod shares;
mod token;

pub use auth::AuthService;
pub use notes::NoteService;
pub use password::PasswordService;
pub use shares::ShareService;
pub use token::TokenService;
