//! Grammar-Based Key Generation Service
//!
//! Generates randomized keys by derivation over a small context-free
//! grammar of character classes, scores strings for Shannon entropy,
//! and offers authenticated AES-GCM encryption of short text payloads.
//! All three utilities are exposed over an HTTP API.
//!
//! # Architecture
//!
//! The generator follows an explicit data flow:
//!
//! ```text
//! modes → terminal set → grammar → randomized derivation → key + trace
//!
//! analysis (entropy scoring)      cipher (KDF → AES-GCM)
//! ```
//!
//! The entropy scorer and the cipher are independent utilities that
//! share only the HTTP surface with the generator.
//!
//! # Design Principles
//!
//! - **Every derivation is traced**: each rewrite step is recorded and
//!   returned to the caller for display and audit
//! - **No cryptographic claims for generated keys**: alternative
//!   selection uses an ordinary PRNG; entropy scores are indicators,
//!   not proofs
//! - **Tamper-evident encryption**: AES-GCM authenticates on decrypt;
//!   there is no silent wrong-plaintext path
//! - **Documented KDF limitation**: the passphrase KDF uses a fixed
//!   salt by contract; see [`cipher::kdf`]
//!
//! # Example
//!
//! ```
//! use grammar_keygen::analysis::{shannon_entropy, EntropyTier, MAX_ENTROPY_BITS};
//! use grammar_keygen::grammar::{GrammarMode, KeyGenerator};
//!
//! let generator = KeyGenerator::new(&[GrammarMode::Alphanumeric, GrammarMode::Symbolic]);
//! let derivation = generator.generate(Some(16));
//!
//! assert_eq!(derivation.key.chars().count(), 16);
//! assert_eq!(derivation.steps.last().unwrap().result, derivation.key);
//!
//! let entropy = shannon_entropy(&derivation.key);
//! let tier = EntropyTier::classify(entropy, MAX_ENTROPY_BITS);
//! println!("{} ({:.4} bits/char, {})", derivation.key, entropy, tier.color());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod api;
pub mod cipher;
pub mod grammar;
pub mod metrics;

// Re-export commonly used types at crate root
pub use analysis::{shannon_entropy, EntropyTier, MAX_ENTROPY_BITS};
pub use api::{ApiServer, ServerConfig};
pub use cipher::{decrypt, encrypt, CipherError, EncryptedText};
pub use grammar::{Derivation, DerivationStep, Grammar, GrammarMode, KeyGenerator, TerminalSet};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
