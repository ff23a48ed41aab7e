// JWT token service for the authentication handshake
// Decision: HS256 by default (symmetric key); HS384/HS512 accepted via config
// Decision: Zero leeway on expiration - a token past its instant is invalid
// Decision: Tokens are stateless; validity is signature + expiration only

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthFailure;
use crate::user::UserRecord;

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key material for signing and verification
    pub secret: String,
    /// Symmetric signing algorithm
    pub algorithm: Algorithm,
    /// Default token lifetime when the caller does not supply one
    pub default_ttl: std::time::Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: Algorithm::HS256,
            default_ttl: std::time::Duration::from_secs(30 * 60), // 30 minutes
        }
    }
}

/// Claim set embedded in issued tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Token issuance and validation.
///
/// Issuance is pure computation over the claim set and cannot fail under
/// normal conditions; validation collapses every failure mode (bad
/// signature, malformed structure, wrong algorithm, expired, missing
/// subject) into [`AuthFailure::InvalidToken`].
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a signed token for a verified identity.
    ///
    /// `ttl` falls back to the configured default lifetime.
    pub fn issue(&self, user: &UserRecord, ttl: Option<Duration>) -> Result<String> {
        let ttl = match ttl {
            Some(ttl) => ttl,
            None => Duration::from_std(self.config.default_ttl)
                .context("Configured token lifetime out of range")?,
        };
        self.issue_at(user, ttl, Utc::now())
    }

    /// Issue a token as of an explicit instant.
    ///
    /// The clock is a parameter so expiration behavior can be exercised
    /// deterministically; production callers go through [`Self::issue`].
    pub fn issue_at(&self, user: &UserRecord, ttl: Duration, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: user.username.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .context("Failed to encode access token")
    }

    /// Decode a token and verify signature and expiration.
    ///
    /// Returns the embedded claim set; resolution of the subject against
    /// the user directory is the caller's job (see `verifier::validate`).
    pub fn decode(&self, token: &str) -> Result<Claims, AuthFailure> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AuthFailure::InvalidToken
            })?;

        Ok(token_data.claims)
    }

    /// Default token lifetime in seconds
    pub fn default_ttl_secs(&self) -> i64 {
        self.config.default_ttl.as_secs() as i64
    }
}
