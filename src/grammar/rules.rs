//! Grammar symbols and production rules.
//!
//! The derivation grammar is two-level and fixed-shape: `Start` expands
//! to a sequence of `Terminal` symbols of one of the candidate lengths,
//! and `Terminal` expands to a single literal character from the
//! terminal set. Symbols carry their terminal/nonterminal nature in the
//! type rather than by lookup, so a literal character can never be
//! mistaken for a rule name.

use super::charset::TerminalSet;

/// Candidate key lengths offered by the start symbol when no explicit
/// length is requested.
pub const CANDIDATE_LENGTHS: [usize; 4] = [8, 10, 12, 16];

/// A grammar symbol appearing in a derivation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// The start symbol; expands to a run of `Terminal` symbols.
    Start,
    /// The terminal placeholder; expands to one literal character.
    Terminal,
    /// A literal output character. Has no productions.
    Literal(char),
}

impl Symbol {
    /// Returns true if this symbol still has productions to apply.
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Start | Symbol::Terminal)
    }

    /// Display name as it appears in derivation traces.
    pub fn display(&self) -> String {
        match self {
            Symbol::Start => "Start".to_string(),
            Symbol::Terminal => "Terminal".to_string(),
            Symbol::Literal(ch) => ch.to_string(),
        }
    }
}

/// One production alternative: an ordered sequence of symbols.
pub type Production = Vec<Symbol>;

/// The two-level derivation grammar for one generation request.
///
/// Deterministic given the same terminal set; randomness enters only
/// when the derivation engine chooses among alternatives.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: Vec<Production>,
    terminal: Vec<Production>,
}

impl Grammar {
    /// Builds the grammar over the given terminal set.
    pub fn build(set: &TerminalSet) -> Self {
        let start = CANDIDATE_LENGTHS
            .iter()
            .map(|&n| vec![Symbol::Terminal; n])
            .collect();

        let terminal = set
            .chars()
            .iter()
            .map(|&ch| vec![Symbol::Literal(ch)])
            .collect();

        Self { start, terminal }
    }

    /// Alternatives for the start symbol.
    pub fn start_alternatives(&self) -> &[Production] {
        &self.start
    }

    /// Alternatives for the terminal placeholder, one per pool character.
    pub fn terminal_alternatives(&self) -> &[Production] {
        &self.terminal
    }

    /// Alternatives for an arbitrary symbol; `None` for literals.
    pub fn alternatives(&self, symbol: Symbol) -> Option<&[Production]> {
        match symbol {
            Symbol::Start => Some(&self.start),
            Symbol::Terminal => Some(&self.terminal),
            Symbol::Literal(_) => None,
        }
    }
}
