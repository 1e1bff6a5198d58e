/**
 * Password Hashing
 *
 * bcrypt is CPU-bound, so hashing and verification run on the blocking
 * thread pool to keep request tasks responsive.
 *
 * bcrypt reads at most 72 bytes of input. Passwords may be longer, so the
 * plaintext is first reduced to its hex SHA-256 digest (64 bytes) and that
 * digest is what bcrypt salts and stretches.
 */

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One-way salted password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

/// Fixed-length bcrypt input covering every byte of the password
fn prehash(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted digest of `plaintext`
    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let plaintext = prehash(plaintext);
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(digest)
    }

    /// Check `plaintext` against `digest`.
    ///
    /// Malformed digests and task failures yield `false`.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let plaintext = prehash(plaintext);
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest).unwrap_or(false))
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            })
    }
}
