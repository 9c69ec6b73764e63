//! Grammar-based key generation.
//!
//! This module builds a fixed-shape, two-level derivation grammar from
//! a selection of character classes and derives keys from it by
//! randomized rewriting, recording every step for display and audit.

mod charset;
mod derivation;
mod rules;

pub use charset::{GrammarMode, TerminalSet};
pub use derivation::{Derivation, DerivationStep, KeyGenerator};
pub use rules::{Grammar, Production, Symbol, CANDIDATE_LENGTHS};
