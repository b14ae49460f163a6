//! Bearer access tokens.
//!
//! Tokens are HMAC-signed JWTs carrying the user id (`sub`), issue time and an
//! absolute expiry. The signing key and algorithm are fixed for the lifetime of
//! the process.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates access tokens.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            default_ttl,
        }
    }

    /// Issue a token for `subject_id` valid for the default lifetime.
    pub fn issue(&self, subject_id: &str) -> Result<String> {
        self.issue_with_ttl(subject_id, self.default_ttl)
    }

    /// Issue a token for `subject_id` valid for `ttl`.
    pub fn issue_with_ttl(&self, subject_id: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Return the subject of a valid token.
    ///
    /// Malformed, forged, wrongly-signed and expired tokens all produce the
    /// same `Unauthenticated` error.
    pub fn validate(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::Unauthenticated)?;

        // jsonwebtoken treats exp == now as still valid.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(Error::Unauthenticated);
        }

        Ok(data.claims.sub)
    }
}
