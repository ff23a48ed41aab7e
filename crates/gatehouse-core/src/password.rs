// Stored-secret hashing for the credential verifier
// Decision: Argon2id, with the cost parameters configurable per deployment;
// the PHC string embeds the parameters, so records hashed under one cost
// profile still verify after the profile changes

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Hashes plaintext secrets into PHC strings and checks presented secrets
/// against stored hashes.
///
/// Verification is constant-time inside the argon2 crate. A stored hash
/// that does not parse as a PHC string is an error, not a mismatch, so a
/// corrupt fixture is distinguishable from a wrong secret at the call site
/// (the verifier still collapses both for the client).
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl SecretHasher {
    /// Build a hasher with explicit Argon2id cost parameters
    /// (memory in KiB, iterations, parallelism).
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| anyhow!("Invalid Argon2 cost parameters: {}", e))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext secret with a fresh random salt.
    pub fn hash(&self, secret: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| anyhow!("Secret hashing failed: {}", e))?;

        Ok(hash.to_string())
    }

    /// Check a presented secret against a stored PHC string.
    pub fn verify(&self, secret: &str, stored: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| anyhow!("Stored hash is not a valid PHC string: {}", e))?;

        Ok(self
            .argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Hash a secret with the default cost profile.
pub fn hash_password(password: &str) -> Result<String> {
    SecretHasher::default().hash(password)
}

/// Verify a secret against a stored hash using the parameters the hash
/// itself carries.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    SecretHasher::default().verify(password, hash)
}
