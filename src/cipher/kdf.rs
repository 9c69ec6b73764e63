//! Passphrase-based key derivation.
//!
//! Derives the AES-256 key from an arbitrary-length passphrase with
//! PBKDF2-HMAC-SHA256.
//!
//! # Known Limitation
//!
//! The salt is a fixed constant, so the same passphrase always derives
//! the same key. Callers depend on this deterministic mapping (encrypt
//! on one host, decrypt on another, no salt exchange), which is why it
//! is kept rather than randomized per use. Do not reuse this derivation
//! for anything that needs per-use salting.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Fixed derivation salt. See the module docs for why this is constant.
const KDF_SALT: &[u8] = b"crypto_key_salt";

/// PBKDF2 iteration count.
const KDF_ITERATIONS: u32 = 100_000;

/// Derives 32 bytes of key material from a passphrase.
pub fn derive_key(passphrase: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key);
    key
}
