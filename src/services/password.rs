//! Password hashing and verification with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so the
//! random salt and the cost parameters travel with the digest and nothing else
//! needs to be stored. Verification reads the parameters back out of the
//! digest, which keeps older hashes valid after the configured cost changes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::PasswordConfig;
use crate::error::{Error, Result};

/// Hashes and verifies user passwords.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Create a password service with the given cost parameters.
    pub fn new(config: PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| Error::Internal(format!("Invalid password hashing parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// Accepts the digest as text or as its UTF-8 bytes. A malformed digest is
    /// a mismatch, never an error.
    pub fn verify(&self, plaintext: &str, digest: impl AsRef<[u8]>) -> bool {
        let Ok(digest) = std::str::from_utf8(digest.as_ref()) else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
pub(crate) fn fast_password_config() -> PasswordConfig {
    PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}
