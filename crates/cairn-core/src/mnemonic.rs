//! Seed phrase handling and key derivation
//!
//! Phrases and passwords travel as [`SecretString`] so the backing
//! memory is wiped when they go out of scope. Wordlist and checksum
//! validation belong to the wallet that produced the phrase; this module
//! checks the format and derives the wallet's root discrete-log secret.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{ProverError, Result};
use crate::secret::{DlogSecret, SecretEntry};
use crate::group::SecretExponent;

/// Accepted mnemonic lengths (words)
pub const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Domain separator for seed derivation
const SEED_DOMAIN: &[u8] = b"cairn mnemonic seed";

/// A sensitive string, wiped from memory on drop
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<wiped on drop>)")
    }
}

/// A validated seed phrase plus its protecting password
#[derive(Debug, Clone)]
pub struct Mnemonic {
    phrase: SecretString,
    password: SecretString,
}

impl Mnemonic {
    /// Validate the phrase format and wrap it
    ///
    /// The phrase must contain 12, 15, 18, 21 or 24 lowercase ASCII
    /// words. An empty password is allowed.
    pub fn new(phrase: SecretString, password: SecretString) -> Result<Self> {
        let words: Vec<&str> = phrase.as_str().split_whitespace().collect();
        if !MNEMONIC_WORD_COUNTS.contains(&words.len()) {
            return Err(ProverError::InvalidMnemonic(format!(
                "expected 12, 15, 18, 21 or 24 words, got {}",
                words.len()
            )));
        }
        if words
            .iter()
            .any(|w| !w.chars().all(|c| c.is_ascii_lowercase()))
        {
            return Err(ProverError::InvalidMnemonic(
                "words must be lowercase ASCII".to_string(),
            ));
        }
        Ok(Self { phrase, password })
    }

    /// Derive the secret entries this mnemonic contributes to a prover
    pub fn to_secrets(&self) -> Result<Vec<SecretEntry>> {
        let x = self.derive_exponent()?;
        Ok(vec![SecretEntry::Dlog(DlogSecret::new(x))])
    }

    /// Derive the root exponent from phrase + password
    ///
    /// Domain-separated SHA-256 with rejection sampling: the counter is
    /// bumped until the digest lands inside the scalar field. The first
    /// digest is accepted with overwhelming probability.
    fn derive_exponent(&self) -> Result<SecretExponent> {
        for counter in 0u8..=255 {
            let mut hasher = Sha256::new();
            hasher.update(SEED_DOMAIN);
            hasher.update([counter]);
            hasher.update(self.phrase.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(self.password.as_str().as_bytes());
            let mut digest: [u8; 32] = hasher.finalize().into();
            match SecretExponent::from_bytes(digest) {
                Ok(x) => return Ok(x),
                Err(_) => digest.zeroize(),
            }
        }
        Err(ProverError::InvalidMnemonic(
            "could not derive a scalar from this phrase".to_string(),
        ))
    }
}
