// Server configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: A missing signing secret gets a random dev value with a warning;
// an explicitly empty or otherwise unusable value is a fatal startup error

use anyhow::{bail, Context, Result};
use jsonwebtoken::Algorithm;
use std::path::PathBuf;
use std::time::Duration;

use gatehouse_core::TokenConfig;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,
    /// Allowed CORS origins (empty disables the CORS layer)
    pub cors_origins: Vec<String>,
    /// Token signing configuration
    pub token: TokenConfig,
    /// Optional path to a JSON user fixture; unset uses the dev seed
    pub users_fixture: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Misconfiguration (empty secret, unknown algorithm, unparsable TTL)
    /// is a startup error, never a per-request failure.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());

        let cors_origins: Vec<String> = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let secret = match std::env::var("AUTH_JWT_SECRET") {
            Ok(s) if s.is_empty() => bail!("AUTH_JWT_SECRET is set but empty"),
            Ok(s) => s,
            Err(_) => {
                // Generate a random secret for dev mode; tokens do not
                // survive a restart
                tracing::warn!("AUTH_JWT_SECRET not set, generating a random dev secret");
                use rand::Rng;
                let bytes: [u8; 32] = rand::thread_rng().gen();
                hex::encode(bytes)
            }
        };

        let algorithm = match std::env::var("AUTH_JWT_ALGORITHM") {
            Ok(s) => parse_algorithm(&s)?,
            Err(_) => Algorithm::HS256,
        };

        let default_ttl = match std::env::var("AUTH_TOKEN_TTL_MINUTES") {
            Ok(s) => parse_ttl_minutes(&s)?,
            Err(_) => Duration::from_secs(30 * 60),
        };

        let users_fixture = std::env::var("USERS_FIXTURE").ok().map(PathBuf::from);

        Ok(Self {
            bind_addr,
            cors_origins,
            token: TokenConfig {
                secret,
                algorithm,
                default_ttl,
            },
            users_fixture,
        })
    }
}

/// Parse a token lifetime given in minutes.
///
/// Overflow is a configuration error like any other, not a wrapped value.
fn parse_ttl_minutes(s: &str) -> Result<Duration> {
    let minutes: u64 = s
        .parse()
        .with_context(|| format!("Invalid AUTH_TOKEN_TTL_MINUTES: {s:?}"))?;
    let secs = minutes
        .checked_mul(60)
        .with_context(|| format!("AUTH_TOKEN_TTL_MINUTES out of range: {minutes}"))?;
    Ok(Duration::from_secs(secs))
}

/// Parse a symmetric signing algorithm identifier.
///
/// Only the HMAC family is supported; asymmetric identifiers are rejected
/// rather than silently downgraded.
fn parse_algorithm(s: &str) -> Result<Algorithm> {
    match s.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => bail!("Unsupported AUTH_JWT_ALGORITHM: {other:?} (expected HS256, HS384, or HS512)"),
    }
}
