//! Authenticated symmetric encryption of text payloads.
//!
//! A passphrase is stretched into an AES-256 key with PBKDF2, and the
//! text is sealed with AES-GCM so tampering is detected on decrypt.
//!
//! # Security Model
//!
//! - AES-256-GCM with a fresh random 96-bit nonce per encryption
//! - PBKDF2-HMAC-SHA256 at 100,000 iterations for key derivation
//! - The KDF salt is fixed, so a passphrase always maps to the same
//!   key; see [`kdf`] for why this documented weakness is preserved

pub mod kdf;

mod aead;

pub use aead::{decrypt, encrypt, CipherError, EncryptedText, NONCE_LEN};
pub use kdf::{derive_key, KEY_LEN};
