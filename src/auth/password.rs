//! Argon2id password hashing and verification.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::config::AuthConfig;
use crate::error::AppError;

/// Salted one-way password hashing.
///
/// The encoded PHC string carries algorithm, parameters and salt, so hashes
/// produced under an older cost still verify after the cost changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// `cost` is the Argon2 iteration count, `memory_kib` its memory cost.
    pub fn new(cost: u32, memory_kib: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AppError::ConfigError(format!("Invalid password hashing parameters: {e}")))?;
        Ok(Self { params })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(config.hash_cost, config.hash_memory_kib)
    }

    /// Hashes with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Checks `plaintext` against an encoded hash using the parameters stored
    /// in it. Malformed input yields `false`.
    pub fn verify(&self, plaintext: &str, encoded_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(encoded_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
