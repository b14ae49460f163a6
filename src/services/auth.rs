//! Auth service for email/password accounts and bearer tokens.
//!
//! Handles:
//! - Signup (unique email, hashed password, token for the new account)
//! - Login (one error for every credential failure)
//! - Resolving a bearer token back to a user on each protected request

use std::sync::Arc;

use tracing::{debug, info};

use crate::db::{Store, UserFilter};
use crate::error::{Error, Result};
use crate::models::{now, NewUser, User};

use super::{PasswordService, TokenService};

/// Service for authentication.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(store: Arc<dyn Store>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Register a new account and return an access token for it.
    ///
    /// The email lookup and the insert are separate store calls; the store's
    /// own uniqueness check rejects the loser of a concurrent signup race.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<String> {
        validate_email(email)?;

        let existing = self
            .store
            .find_user(&UserFilter::Email(email.to_string()))
            .await?;
        if existing.is_some() {
            return Err(Error::EmailTaken);
        }

        let password_hash = self.hash_password(password).await?;

        let user_id = self
            .store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
                created_at: now(),
            })
            .await?;

        info!(user_id = %user_id, "Created user");

        self.tokens.issue(&user_id)
    }

    /// Check credentials and return an access token.
    ///
    /// An unknown email and a wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        validate_email(email)?;

        let Some(user) = self
            .store
            .find_user(&UserFilter::Email(email.to_string()))
            .await?
        else {
            debug!("Login rejected");
            return Err(Error::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "Login rejected");
            return Err(Error::InvalidCredentials);
        }

        debug!(user_id = %user.id, "User logged in");

        self.tokens.issue(&user.id)
    }

    /// Resolve a bearer token to its user.
    ///
    /// Invalid tokens, subjects that are not well-formed ids and subjects with
    /// no matching user are all `Unauthenticated`.
    pub async fn resolve(&self, token: &str) -> Result<User> {
        let user_id = self.tokens.validate(token)?;

        match self.store.find_user(&UserFilter::Id(user_id)).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) | Err(Error::Validation(_)) => Err(Error::Unauthenticated),
            Err(e) => Err(e),
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let passwords = self.passwords.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, digest: &str) -> Result<bool> {
        let passwords = self.passwords.clone();
        let password = password.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || passwords.verify(&password, &digest))
            .await
            .map_err(|e| Error::Internal(format!("Password verification task failed: {}", e)))
    }
}

/// Minimal address syntax check: one `@` with a non-empty local part and a
/// dotted domain.
fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Validation("Invalid email address".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, SqliteStore};
    use crate::services::password::fast_password_config;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    async fn service() -> (AuthService, TokenService) {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::new(test_pool().await));
        let tokens = TokenService::new(b"secret", Algorithm::HS256, Duration::minutes(30));
        let passwords = PasswordService::new(fast_password_config()).unwrap();
        (AuthService::new(store, passwords, tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn test_signup_login_resolve_same_user() {
        let (auth, _) = service().await;

        let t1 = auth.signup("a@x.com", "pw", "A").await.unwrap();
        let t2 = auth.login("a@x.com", "pw").await.unwrap();

        let u1 = auth.resolve(&t1).await.unwrap();
        let u2 = auth.resolve(&t2).await.unwrap();
        assert_eq!(u1.id, u2.id);
        assert_eq!(u1.email, "a@x.com");
        assert_eq!(u1.name, "A");
        assert_ne!(u1.password_hash, "pw");
        assert!(u1.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_email_taken() {
        let (auth, _) = service().await;

        auth.signup("a@x.com", "pw", "A").await.unwrap();
        let err = auth.signup("a@x.com", "pw2", "B").await.unwrap_err();
        assert!(matches!(err, Error::EmailTaken));
    }

    #[tokio::test]
    async fn test_concurrent_signups_one_wins() {
        let (auth, _) = service().await;

        let (a, b) = tokio::join!(
            auth.signup("race@x.com", "pw", "A"),
            auth.signup("race@x.com", "pw", "B"),
        );
        let outcomes = [a.is_ok(), b.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_identical() {
        let (auth, _) = service().await;
        auth.signup("a@x.com", "pw", "A").await.unwrap();

        let unknown = auth.login("nobody@x.com", "pw").await.unwrap_err();
        let wrong = auth.login("a@x.com", "nope").await.unwrap_err();

        assert!(matches!(unknown, Error::InvalidCredentials));
        assert!(matches!(wrong, Error::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_resolve_rejects_bad_tokens() {
        let (auth, tokens) = service().await;

        assert!(matches!(auth.resolve("garbage").await, Err(Error::Unauthenticated)));

        // Well-signed, but the subject is not an id.
        let odd_subject = tokens.issue("not-an-id").unwrap();
        assert!(matches!(auth.resolve(&odd_subject).await, Err(Error::Unauthenticated)));

        // Well-signed, well-formed, but no such user.
        let ghost = tokens.issue(&crate::models::new_id()).unwrap();
        assert!(matches!(auth.resolve(&ghost).await, Err(Error::Unauthenticated)));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a@@x.com").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }
}
