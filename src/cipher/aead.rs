//! Authenticated text encryption with AES-256-GCM.
//!
//! Ciphertext and nonce travel as standard-base64 strings so they can
//! be carried in JSON bodies. Each encryption draws a fresh 96-bit
//! nonce from the OS entropy source; no associated data is used.

use super::kdf::derive_key;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand_core::{OsRng, RngCore};
use serde::Serialize;
use thiserror::Error;

/// GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Errors that can occur during encryption or decryption.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptionFailure,

    #[error("authentication failed: ciphertext, nonce, and key do not verify")]
    AuthenticationFailure,

    #[error("malformed base64 input: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("nonce must be {NONCE_LEN} bytes, got {0}")]
    NonceLength(usize),

    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
}

/// An encrypted payload ready for transport.
#[derive(Debug, Clone, Serialize)]
pub struct EncryptedText {
    /// Base64-encoded ciphertext (including the GCM tag).
    pub encrypted: String,
    /// Base64-encoded 96-bit nonce.
    pub nonce: String,
}

/// Encrypts `plaintext` under a key derived from `passphrase`.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<EncryptedText, CipherError> {
    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| CipherError::EncryptionFailure)?;

    Ok(EncryptedText {
        encrypted: BASE64.encode(ciphertext),
        nonce: BASE64.encode(nonce_bytes),
    })
}

/// Decrypts a base64 ciphertext/nonce pair under a key derived from
/// `passphrase`.
///
/// Fails with [`CipherError::AuthenticationFailure`] when the GCM tag
/// does not verify: tampered ciphertext, a mismatched nonce, or the
/// wrong passphrase. There is no path that returns wrong plaintext.
pub fn decrypt(encrypted: &str, nonce: &str, passphrase: &str) -> Result<String, CipherError> {
    let ciphertext = BASE64.decode(encrypted)?;
    let nonce_bytes = BASE64.decode(nonce)?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(CipherError::NonceLength(nonce_bytes.len()));
    }

    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
        .map_err(|_| CipherError::AuthenticationFailure)?;

    String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
}
