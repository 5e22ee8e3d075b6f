//! Password hashing helpers built around Argon2id.
//! The cost factor is a bounded option checked once at startup, so a hash call
//! made while serving requests can never fail on misconfiguration.

use argon2::password_hash::SaltString;
use argon2::{password_hash, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::warn;

/// Smallest accepted cost factor: 2^8 KiB = 256 KiB of memory.
pub const MIN_COST: u32 = 8;
/// Largest accepted cost factor: 2^20 KiB = 1 GiB of memory.
pub const MAX_COST: u32 = 20;
pub const DEFAULT_COST: u32 = 14;

/// Iterations and lanes stay fixed; only memory scales with the cost factor.
const TIME_COST: u32 = 3;
const PARALLELISM: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashConfigurationError {
    #[error("hash cost factor {cost} outside valid range {min}..={max}")]
    CostOutOfRange { cost: u32, min: u32, max: u32 },
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] password_hash::Error),
}

/// Validated cost factor. Memory use, and with it hashing latency, doubles
/// with every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost(u32);

impl HashCost {
    pub fn new(cost: u32) -> Result<Self, HashConfigurationError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashConfigurationError::CostOutOfRange {
                cost,
                min: MIN_COST,
                max: MAX_COST,
            });
        }
        Ok(Self(cost))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn memory_kib(self) -> u32 {
        1 << self.0
    }

    fn hasher(self) -> Result<Argon2<'static>, password_hash::Error> {
        let params = Params::new(self.memory_kib(), TIME_COST, PARALLELISM, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self(DEFAULT_COST)
    }
}

/// Hashes a password with Argon2id and returns the PHC string.
/// A fresh random salt is drawn on every call, so equal inputs produce
/// different strings that all verify against the same password.
pub fn hash_password(plaintext: &str, cost: HashCost) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = cost.hasher()?;
    let password_hash = argon2.hash_password(plaintext.as_bytes(), &salt)?.to_string();
    Ok(password_hash)
}

/// Verifies a plaintext password against a stored PHC hash using the
/// algorithm and parameters recorded in the hash itself. The digest
/// comparison is constant-time. Returns `false` for any failure, including a
/// stored hash that does not parse.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(_) => {
            warn!("stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_PASSWORD_HASH;

    fn fast() -> HashCost {
        HashCost::new(MIN_COST).expect("minimum cost is valid")
    }

    #[test]
    fn hashes_and_verifies_passwords() {
        let hash = hash_password("arcd-test-password", fast()).expect("hashing should succeed");
        assert!(verify_password("arcd-test-password", &hash));
        assert!(!verify_password("wrong-password", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn salts_every_hash() {
        let first = hash_password("same", fast()).unwrap();
        let second = hash_password("same", fast()).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn encodes_cost_in_hash() {
        let hash = hash_password("pw", fast()).unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=256,t=3,p=1$"), "{hash}");
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert_eq!(
            HashCost::new(MIN_COST - 1),
            Err(HashConfigurationError::CostOutOfRange { cost: 7, min: 8, max: 20 })
        );
        assert!(HashCost::new(MAX_COST + 1).is_err());
        assert_eq!(HashCost::new(MAX_COST).unwrap().get(), MAX_COST);
        assert_eq!(HashCost::default().get(), DEFAULT_COST);
    }

    #[test]
    fn unparsable_hash_never_verifies() {
        assert!(!verify_password("arc", ""));
        assert!(!verify_password("arc", "not-a-phc-string"));
        assert!(!verify_password("arc", "$2a$10$gwnHUhLVV9tgPtZfX4.jDOz6qzGgRHZmtE2YpMr9K1RpIO71YJViO"));
    }

    #[test]
    fn default_hash_matches_default_password() {
        assert!(verify_password("arc", DEFAULT_PASSWORD_HASH));
        assert!(!verify_password("arc ", DEFAULT_PASSWORD_HASH));
    }
}
