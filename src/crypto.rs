//! Password hashing and key generation.
//!
//! Argon2id hashing is CPU-heavy, so the async helpers move it onto the
//! blocking pool instead of stalling the runtime.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::config::SecurityConfig;

/// Salts, hashes and verifies passwords with the configured Argon2 cost.
#[derive(Debug, Clone)]
pub struct CryptographyHelper {
    config: SecurityConfig,
}

impl CryptographyHelper {
    #[must_use]
    pub const fn new(config: SecurityConfig) -> Self {
        Self { config }
    }

    /// Fresh random salt in the B64 alphabet Argon2 expects.
    #[must_use]
    pub fn generate_salt(&self) -> String {
        SaltString::generate(&mut OsRng).as_str().to_string()
    }

    pub fn hash_password(&self, password: &str, salt: &str) -> Result<String> {
        hash_password(password, salt, &self.config)
    }

    /// Hashes on the blocking pool.
    pub async fn hash_password_async(&self, password: &str, salt: &str) -> Result<String> {
        let password = password.to_string();
        let salt = salt.to_string();
        let config = self.config.clone();

        task::spawn_blocking(move || hash_password(&password, &salt, &config))
            .await
            .context("Password hashing task panicked")?
    }

    /// Verifies on the blocking pool.
    pub async fn verify_password_async(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")?
    }
}

/// Hash a password using Argon2id with the given salt and cost params.
pub fn hash_password(password: &str, salt: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::from_b64(salt).map_err(|e| anyhow::anyhow!("Invalid salt: {e}"))?;

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Params are read back from the PHC string, so hashes made with older cost
/// settings still verify.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn hash_then_verify() {
        let helper = CryptographyHelper::new(cheap_config());
        let salt = helper.generate_salt();
        let hash = helper.hash_password("jdoe@07041995", &salt).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains(&salt));
        assert!(verify_password("jdoe@07041995", &hash).unwrap());
        assert!(!verify_password("jdoe@07041996", &hash).unwrap());
    }

    #[test]
    fn same_salt_same_hash() {
        let helper = CryptographyHelper::new(cheap_config());
        let salt = helper.generate_salt();
        let a = helper.hash_password("secret", &salt).unwrap();
        let b = helper.hash_password("secret", &salt).unwrap();
        assert_eq!(a, b);
        assert_ne!(salt, helper.generate_salt());
    }

    #[test]
    fn rejects_garbage_hash() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn api_key_is_hex() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn async_helpers_roundtrip() {
        let helper = CryptographyHelper::new(cheap_config());
        let salt = helper.generate_salt();
        let hash = helper.hash_password_async("pw", &salt).await.unwrap();
        assert!(helper.verify_password_async("pw", &hash).await.unwrap());
    }
}
