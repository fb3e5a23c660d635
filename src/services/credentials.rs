// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Encoded form: `pbkdf2_sha256$<iterations>$<salt>$<hash>`, salt and hash
//! in unpadded standard base64. The iteration count travels with the hash,
//! so raising it only affects newly set passwords.

use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD_NO_PAD as BASE64, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hashes and verifies passwords. Work runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct Credentials {
    iterations: NonZeroU32,
}

impl Credentials {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: NonZeroU32::new(iterations).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// Hash a password with a fresh random salt.
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let iterations = self.iterations;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hash_with(iterations, &password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
    }

    /// Check a password against an encoded hash. Malformed hashes never match.
    pub async fn verify(&self, password: &str, encoded: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let encoded = encoded.to_owned();

        tokio::task::spawn_blocking(move || verify_with(&password, &encoded))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))
    }
}

fn hash_with(iterations: NonZeroU32, password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        BASE64.encode(salt),
        BASE64.encode(hash)
    ))
}

fn verify_with(password: &str, encoded: &str) -> bool {
    let parts: Vec<&str> = encoded.split('$').collect();
    let [scheme, iterations, salt, hash] = parts.as_slice() else {
        return false;
    };
    if *scheme != SCHEME {
        return false;
    }

    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (BASE64.decode(salt), BASE64.decode(hash)) else {
        return false;
    };

    pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let credentials = Credentials::new(1_000);
        let encoded = credentials.hash("correct horse").await.unwrap();

        assert!(encoded.starts_with("pbkdf2_sha256$1000$"));
        assert!(credentials.verify("correct horse", &encoded).await.unwrap());
        assert!(!credentials.verify("wrong horse", &encoded).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let credentials = Credentials::new(1_000);
        let a = credentials.hash("same").await.unwrap();
        let b = credentials.hash("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_verify_uses_stored_iteration_count() {
        let encoded = Credentials::new(1_500).hash("pw-12345").await.unwrap();
        assert!(Credentials::new(9_999)
            .verify("pw-12345", &encoded)
            .await
            .unwrap());
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_with("pw", ""));
        assert!(!verify_with("pw", "md5$1$abc$def"));
        assert!(!verify_with("pw", "pbkdf2_sha256$0$abc$def"));
        assert!(!verify_with("pw", "pbkdf2_sha256$1000$!!!$def"));
    }
}
