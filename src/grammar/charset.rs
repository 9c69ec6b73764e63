//! Character classes and terminal set construction.
//!
//! Each grammar mode selects a fixed, ordered table of characters.
//! The terminal set is the deduplicated union of the selected tables,
//! assembled in a fixed class order so the same mode selection always
//! yields the same set.

use serde::{Deserialize, Serialize};

/// Digits 0-9.
const DIGITS: &str = "0123456789";

/// Lowercase then uppercase Latin letters.
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The 32-character special symbol table.
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|\\;:'\",.<>/?~`";

/// A character class selectable for key generation.
///
/// Classes are not mutually exclusive: `Alphanumeric` is a superset of
/// `Numeric` and `Alphabetic`, so combining those three adds nothing
/// beyond `Alphanumeric` alone. Only `Symbolic` extends the pool further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarMode {
    /// Numbers only (0-9).
    Numeric,
    /// Letters only (a-z, A-Z).
    Alphabetic,
    /// Letters and numbers (a-z, A-Z, 0-9).
    Alphanumeric,
    /// Special characters only.
    Symbolic,
}

impl GrammarMode {
    /// All modes, in the fixed order used to assemble terminal sets.
    pub const ALL: [GrammarMode; 4] = [
        GrammarMode::Numeric,
        GrammarMode::Alphabetic,
        GrammarMode::Alphanumeric,
        GrammarMode::Symbolic,
    ];

    /// Wire identifier for this mode.
    pub fn id(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "numeric",
            GrammarMode::Alphabetic => "alphabetic",
            GrammarMode::Alphanumeric => "alphanumeric",
            GrammarMode::Symbolic => "symbolic",
        }
    }

    /// Display name for mode listings.
    pub fn name(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "Numeric",
            GrammarMode::Alphabetic => "Alphabetic",
            GrammarMode::Alphanumeric => "Alphanumeric",
            GrammarMode::Symbolic => "Symbolic",
        }
    }

    /// Human-readable description for mode listings.
    pub fn description(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "Numbers only (0-9)",
            GrammarMode::Alphabetic => "Letters only (a-z, A-Z)",
            GrammarMode::Alphanumeric => "Letters and numbers (a-z, A-Z, 0-9)",
            GrammarMode::Symbolic => "Special characters only",
        }
    }

    /// Parses a mode identifier, case-insensitively.
    pub fn parse(s: &str) -> Option<GrammarMode> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" => Some(GrammarMode::Numeric),
            "alphabetic" => Some(GrammarMode::Alphabetic),
            "alphanumeric" => Some(GrammarMode::Alphanumeric),
            "symbolic" => Some(GrammarMode::Symbolic),
            _ => None,
        }
    }

    /// The character table this mode contributes.
    fn table(&self) -> String {
        match self {
            GrammarMode::Numeric => DIGITS.to_string(),
            GrammarMode::Alphabetic => LETTERS.to_string(),
            GrammarMode::Alphanumeric => format!("{DIGITS}{LETTERS}"),
            GrammarMode::Symbolic => SYMBOLS.to_string(),
        }
    }
}

/// The ordered, deduplicated pool of output characters for one generation.
///
/// Built fresh per request from the selected modes. Construction is pure
/// and total: any mode selection (including an empty one) produces a
/// non-empty set, falling back to the full 62-character alphanumeric
/// table when the selection contributes nothing.
#[derive(Debug, Clone)]
pub struct TerminalSet {
    chars: Vec<char>,
}

impl TerminalSet {
    /// Builds the terminal set for the given modes.
    ///
    /// Classes are visited in the fixed order numeric, alphabetic,
    /// alphanumeric, symbolic regardless of the order `modes` lists them;
    /// duplicate characters keep their first-seen position.
    pub fn from_modes(modes: &[GrammarMode]) -> Self {
        let mut chars = Vec::new();

        for mode in GrammarMode::ALL {
            if modes.contains(&mode) {
                for ch in mode.table().chars() {
                    if !chars.contains(&ch) {
                        chars.push(ch);
                    }
                }
            }
        }

        if chars.is_empty() {
            chars = GrammarMode::Alphanumeric.table().chars().collect();
        }

        Self { chars }
    }

    /// The characters in first-seen order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of distinct characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the set is empty (never the case after construction).
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns true if `ch` is a member of the set.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Creates a set from explicit characters, for testing edge cases
    /// unreachable through mode selection.
    #[cfg(test)]
    pub(crate) fn from_chars_for_testing(chars: Vec<char>) -> Self {
        Self { chars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_has_32_entries() {
        assert_eq!(SYMBOLS.chars().count(), 32);
    }

    #[test]
    fn test_numeric_set() {
        let set = TerminalSet::from_modes(&[GrammarMode::Numeric]);
        assert_eq!(set.len(), 10);
        assert!(set.chars().iter().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_alphanumeric_set_has_62_entries() {
        let set = TerminalSet::from_modes(&[GrammarMode::Alphanumeric]);
        assert_eq!(set.len(), 62);
    }

    #[test]
    fn test_overlapping_modes_deduplicate() {
        // Alphanumeric already contains everything numeric and alphabetic
        // contribute, so combining all three still yields 62 characters.
        let set = TerminalSet::from_modes(&[
            GrammarMode::Numeric,
            GrammarMode::Alphabetic,
            GrammarMode::Alphanumeric,
        ]);
        assert_eq!(set.len(), 62);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let set = TerminalSet::from_modes(&[GrammarMode::Alphabetic, GrammarMode::Numeric]);
        // Numeric table is visited first regardless of request order.
        assert_eq!(set.chars()[0], '0');
        assert_eq!(set.chars()[10], 'a');
    }

    #[test]
    fn test_symbolic_extends_alphanumeric() {
        let set = TerminalSet::from_modes(&[GrammarMode::Alphanumeric, GrammarMode::Symbolic]);
        assert_eq!(set.len(), 62 + 32);
        assert!(set.contains('!'));
        assert!(set.contains('z'));
    }

    #[test]
    fn test_empty_selection_falls_back_to_alphanumeric() {
        let set = TerminalSet::from_modes(&[]);
        assert_eq!(set.len(), 62);
        assert_eq!(set.chars()[0], '0');
    }

    #[test]
    fn test_no_duplicates_for_any_selection() {
        let set = TerminalSet::from_modes(&GrammarMode::ALL);
        let mut seen = std::collections::HashSet::new();
        assert!(set.chars().iter().all(|c| seen.insert(*c)));
    }

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!(GrammarMode::parse("NuMeRiC"), Some(GrammarMode::Numeric));
        assert_eq!(GrammarMode::parse("SYMBOLIC"), Some(GrammarMode::Symbolic));
        assert_eq!(GrammarMode::parse("hex"), None);
    }
}
