//! Randomized grammar derivation with step-by-step tracing.
//!
//! The engine rewrites the symbol sequence breadth-synchronously: each
//! round scans the current sequence left to right and expands every
//! nonterminal once, recording which rules fired. The grammar is
//! two-level, so every derivation finishes in exactly two rounds past
//! the initial state.
//!
//! Alternative selection uses a non-cryptographic uniform choice. The
//! generated keys make no cryptographic strength claim; the passphrase
//! KDF in [`crate::cipher`] is a separate, unrelated mechanism.

use super::charset::{GrammarMode, TerminalSet};
use super::rules::{Grammar, Production, Symbol};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// One recorded rewrite step of a derivation.
#[derive(Debug, Clone, Serialize)]
pub struct DerivationStep {
    /// 0-based step index.
    pub step: usize,
    /// Snapshot of the symbol sequence after this step.
    pub symbols: Vec<String>,
    /// Which rule(s) fired this step, `" | "`-joined.
    pub rule_applied: String,
    /// Concatenation of the snapshot's symbol names. Only the final
    /// step's value is a valid key; earlier steps still contain
    /// nonterminal names and exist for trace display only.
    pub result: String,
}

/// A completed derivation: the generated key and its full trace.
#[derive(Debug, Clone)]
pub struct Derivation {
    /// The generated key.
    pub key: String,
    /// Every rewrite step, starting from the lone start symbol.
    pub steps: Vec<DerivationStep>,
}

/// Grammar-based key generator.
///
/// Builds its terminal set and grammar fresh at construction; nothing
/// is cached or shared between generator instances.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    terminals: TerminalSet,
    grammar: Grammar,
}

impl KeyGenerator {
    /// Creates a generator for the given mode selection.
    pub fn new(modes: &[GrammarMode]) -> Self {
        let terminals = TerminalSet::from_modes(modes);
        let grammar = Grammar::build(&terminals);
        Self { terminals, grammar }
    }

    /// The terminal set backing this generator.
    pub fn terminal_set(&self) -> &TerminalSet {
        &self.terminals
    }

    /// The grammar backing this generator.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Generates a key using the thread-local RNG.
    ///
    /// With an explicit `length` the start symbol expands to exactly
    /// `max(1, length)` terminals; otherwise one of the grammar's
    /// candidate lengths is chosen uniformly.
    pub fn generate(&self, length: Option<i64>) -> Derivation {
        self.generate_with(length, &mut rand::thread_rng())
    }

    /// Generates a key using the supplied RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, length: Option<i64>, rng: &mut R) -> Derivation {
        let mut current = vec![Symbol::Start];
        let mut steps = vec![DerivationStep {
            step: 0,
            symbols: vec![Symbol::Start.display()],
            rule_applied: "Start: Start".to_string(),
            result: Symbol::Start.display(),
        }];

        let mut step_num = 0;
        while current.iter().any(Symbol::is_nonterminal) {
            step_num += 1;
            let mut next: Vec<Symbol> = Vec::new();
            let mut fired: Vec<String> = Vec::new();

            for &symbol in &current {
                match self.grammar.alternatives(symbol) {
                    Some(alternatives) => {
                        let chosen = match (symbol, length) {
                            (Symbol::Start, Some(n)) => {
                                vec![Symbol::Terminal; n.max(1) as usize]
                            }
                            _ => alternatives
                                .choose(rng)
                                .cloned()
                                // Both rule sets are non-empty by construction.
                                .unwrap_or_default(),
                        };

                        fired.push(format!("{} → {}", symbol.display(), join_symbols(&chosen)));
                        next.extend_from_slice(&chosen);
                    }
                    None => next.push(symbol),
                }
            }

            current = next;
            steps.push(DerivationStep {
                step: step_num,
                symbols: current.iter().map(Symbol::display).collect(),
                rule_applied: if fired.is_empty() {
                    "Terminal".to_string()
                } else {
                    fired.join(" | ")
                },
                result: concat_symbols(&current),
            });
        }

        // All symbols are literals now; the concatenation is the key.
        // Rewrite the last step's result so the trace always ends on it.
        let key = concat_symbols(&current);
        if let Some(last) = steps.last_mut() {
            last.result = key.clone();
        }

        Derivation { key, steps }
    }
}

fn join_symbols(production: &Production) -> String {
    production
        .iter()
        .map(Symbol::display)
        .collect::<Vec<_>>()
        .join(" ")
}

fn concat_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::display).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::rules::CANDIDATE_LENGTHS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn seeded() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(7)
    }

    #[test]
    fn test_step_zero_is_start_symbol() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);
        let d = gen.generate_with(None, &mut seeded());

        assert_eq!(d.steps[0].step, 0);
        assert_eq!(d.steps[0].symbols, vec!["Start".to_string()]);
        assert_eq!(d.steps[0].rule_applied, "Start: Start");
        assert_eq!(d.steps[0].result, "Start");
    }

    #[test]
    fn test_two_rewrite_rounds_past_initial() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);
        let d = gen.generate_with(Some(6), &mut seeded());

        assert_eq!(d.steps.len(), 3);
    }

    #[test]
    fn test_default_length_is_a_candidate() {
        let gen = KeyGenerator::new(&[GrammarMode::Alphanumeric]);
        let mut rng = seeded();

        for _ in 0..32 {
            let d = gen.generate_with(None, &mut rng);
            assert!(CANDIDATE_LENGTHS.contains(&d.key.chars().count()));
        }
    }

    #[test]
    fn test_explicit_length_respected() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);
        let d = gen.generate_with(Some(6), &mut seeded());

        assert_eq!(d.key.chars().count(), 6);
        assert!(d.key.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_non_positive_length_clamped_to_one() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);

        assert_eq!(gen.generate_with(Some(0), &mut seeded()).key.len(), 1);
        assert_eq!(gen.generate_with(Some(-5), &mut seeded()).key.len(), 1);
    }

    #[test]
    fn test_key_characters_come_from_terminal_set() {
        let gen = KeyGenerator::new(&[GrammarMode::Alphanumeric, GrammarMode::Symbolic]);
        let d = gen.generate_with(None, &mut seeded());

        assert!(d.key.chars().all(|c| gen.terminal_set().contains(c)));
    }

    #[test]
    fn test_last_step_result_equals_key() {
        let gen = KeyGenerator::new(&[GrammarMode::Alphanumeric]);
        let d = gen.generate_with(Some(12), &mut seeded());

        assert_eq!(d.steps.last().unwrap().result, d.key);
    }

    #[test]
    fn test_first_rewrite_expands_start() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);
        let d = gen.generate_with(Some(3), &mut seeded());

        assert_eq!(d.steps[1].rule_applied, "Start → Terminal Terminal Terminal");
        assert_eq!(d.steps[1].result, "TerminalTerminalTerminal");
        assert_eq!(d.steps[1].symbols.len(), 3);
    }

    #[test]
    fn test_second_rewrite_fires_once_per_terminal() {
        let gen = KeyGenerator::new(&[GrammarMode::Numeric]);
        let d = gen.generate_with(Some(4), &mut seeded());

        let fragments: Vec<&str> = d.steps[2].rule_applied.split(" | ").collect();
        assert_eq!(fragments.len(), 4);
        assert!(fragments.iter().all(|f| f.starts_with("Terminal → ")));
    }

    #[test]
    fn test_single_character_pool_still_traces() {
        // Content is fully determined, but the trivial rule firings
        // must still be recorded.
        let terminals = TerminalSet::from_chars_for_testing(vec!['x']);
        let grammar = Grammar::build(&terminals);
        let gen = KeyGenerator { terminals, grammar };

        let d = gen.generate_with(Some(3), &mut seeded());

        assert_eq!(d.key, "xxx");
        assert_eq!(
            d.steps[2].rule_applied,
            "Terminal → x | Terminal → x | Terminal → x"
        );
    }

    #[test]
    fn test_same_seed_same_derivation() {
        let gen = KeyGenerator::new(&[GrammarMode::Alphanumeric]);

        let a = gen.generate_with(None, &mut ChaCha20Rng::seed_from_u64(42));
        let b = gen.generate_with(None, &mut ChaCha20Rng::seed_from_u64(42));

        assert_eq!(a.key, b.key);
        assert_eq!(a.steps.len(), b.steps.len());
    }

    proptest! {
        #[test]
        fn prop_explicit_length_and_membership(len in 1i64..64, seed in any::<u64>()) {
            let gen = KeyGenerator::new(&[GrammarMode::Alphanumeric, GrammarMode::Symbolic]);
            let d = gen.generate_with(Some(len), &mut ChaCha20Rng::seed_from_u64(seed));

            prop_assert_eq!(d.key.chars().count(), len as usize);
            prop_assert!(d.key.chars().all(|c| gen.terminal_set().contains(c)));
            prop_assert_eq!(&d.steps.last().unwrap().result, &d.key);
        }
    }
}
