//! Encrypted secret storage
//!
//! Secrets at rest are protected with ChaCha20-Poly1305 under a key
//! derived from the passphrase via Argon2id.
//!
//! # Storage Format
//!
//! The encrypted file contains:
//! - 16-byte Argon2id salt
//! - 12-byte nonce
//! - Encrypted payload (JSON serialized, then encrypted; the
//!   16-byte authentication tag is appended by ChaCha20-Poly1305)

use std::path::Path;

use argon2::Argon2;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{ProverError, Result};
use crate::group::SecretExponent;
use crate::mnemonic::SecretString;
use crate::secret::{DlogSecret, SecretEntry};

/// Size of the Argon2id salt
const SALT_SIZE: usize = 16;

/// Size of the nonce for ChaCha20-Poly1305
const NONCE_SIZE: usize = 12;

/// Decrypted storage payload (JSON)
#[derive(Serialize, Deserialize)]
struct StoredSecrets {
    /// Hex-encoded dlog exponents
    dlog_secrets: Vec<String>,
}

/// Handle on encrypted-at-rest secret material
///
/// Loading only reads the ciphertext; [`SecretStorage::unlock`] derives
/// the key from a passphrase and decrypts. Decrypted entries live only
/// until [`SecretStorage::lock`] or drop.
pub struct SecretStorage {
    ciphertext: Vec<u8>,
    unlocked: Option<Vec<SecretEntry>>,
}

impl SecretStorage {
    /// Wrap raw storage bytes (salt || nonce || ciphertext)
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < SALT_SIZE + NONCE_SIZE {
            return Err(ProverError::Decryption(
                "storage file too short".to_string(),
            ));
        }
        Ok(Self {
            ciphertext: bytes,
            unlocked: None,
        })
    }

    /// Load storage bytes from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Encrypt exponents into storage bytes
    pub fn encrypt(exponents: &[SecretExponent], passphrase: &SecretString) -> Result<Vec<u8>> {
        let payload = StoredSecrets {
            dlog_secrets: exponents.iter().map(|x| hex::encode(x.as_bytes())).collect(),
        };
        let mut plaintext = serde_json::to_vec(&payload)?;

        let mut salt = [0u8; SALT_SIZE];
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let key = derive_key(passphrase, &salt)?;
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref())
            .map_err(|e| ProverError::Decryption(format!("invalid key: {}", e)))?;
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
            .map_err(|e| ProverError::Decryption(format!("encryption failed: {}", e)))?;
        plaintext.zeroize();

        let mut bytes = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + sealed.len());
        bytes.extend_from_slice(&salt);
        bytes.extend_from_slice(&nonce_bytes);
        bytes.extend_from_slice(&sealed);
        Ok(bytes)
    }

    /// Encrypt exponents and write them to a file, returning a locked handle
    pub fn create(
        path: impl AsRef<Path>,
        exponents: &[SecretExponent],
        passphrase: &SecretString,
    ) -> Result<Self> {
        let bytes = Self::encrypt(exponents, passphrase)?;

        // Write atomically
        let path = path.as_ref();
        let temp_path = path.with_extension("enc.tmp");
        std::fs::write(&temp_path, &bytes)?;
        std::fs::rename(&temp_path, path)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Self::from_bytes(bytes)
    }

    /// Derive the key from the passphrase and decrypt the secret entries
    pub fn unlock(&mut self, passphrase: &SecretString) -> Result<()> {
        let salt = &self.ciphertext[..SALT_SIZE];
        let nonce = Nonce::from_slice(&self.ciphertext[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);
        let body = &self.ciphertext[SALT_SIZE + NONCE_SIZE..];

        let key = derive_key(passphrase, salt)?;
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref())
            .map_err(|e| ProverError::Decryption(format!("invalid key: {}", e)))?;
        let mut plaintext = cipher
            .decrypt(nonce, body)
            .map_err(|_| ProverError::Decryption("wrong passphrase or corrupt storage".to_string()))?;

        let parsed: std::result::Result<StoredSecrets, _> = serde_json::from_slice(&plaintext);
        plaintext.zeroize();
        let mut stored =
            parsed.map_err(|e| ProverError::Decryption(format!("corrupt payload: {}", e)))?;

        let mut entries = Vec::with_capacity(stored.dlog_secrets.len());
        for encoded in &stored.dlog_secrets {
            let x = SecretExponent::from_hex(encoded)
                .map_err(|e| ProverError::Decryption(format!("corrupt payload: {}", e)))?;
            entries.push(SecretEntry::Dlog(DlogSecret::new(x)));
        }
        for encoded in &mut stored.dlog_secrets {
            encoded.zeroize();
        }

        debug!(count = entries.len(), "secret storage unlocked");
        self.unlocked = Some(entries);
        Ok(())
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// Borrow the decrypted entries; fails while the storage is locked
    pub fn secrets(&self) -> Result<&[SecretEntry]> {
        self.unlocked
            .as_deref()
            .ok_or_else(|| ProverError::Decryption("secret storage is locked".to_string()))
    }

    /// Drop the decrypted entries, wiping their secret material
    pub fn lock(&mut self) {
        self.unlocked = None;
    }
}

/// Argon2id key derivation from passphrase + salt
fn derive_key(passphrase: &SecretString, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_str().as_bytes(), salt, key.as_mut())
        .map_err(|e| ProverError::Decryption(format!("key derivation failed: {}", e)))?;
    Ok(key)
}
