//! Key quality analysis.
//!
//! This module scores strings for randomness quality. The scores are
//! informational indicators for callers, not cryptographic proofs.

mod entropy;

pub use entropy::{shannon_entropy, EntropyTier, MAX_ENTROPY_BITS};
