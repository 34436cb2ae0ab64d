//! Symbol sequences the index is built over and queried with.
//!
//! A [`Text`] always ends with exactly one [`Symbol::End`]; patterns never
//! contain it. [`Symbol::Wildcard`] only appears in patterns.

use crate::error::{Error, Result};
use std::fmt;

/// Default character that stands for a wildcard position in pattern strings
pub const DEFAULT_WILDCARD_CHAR: char = '*';

/// One position of a text or pattern
///
/// Ordering is `End < Char(_) < Wildcard`, so the terminator edge always sorts
/// first among siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// Terminator; matches nothing, not even a wildcard
    End,
    /// A literal alphabet symbol
    Char(char),
    /// Matches any single non-`End` symbol
    Wildcard,
}

impl Symbol {
    #[inline]
    pub fn is_end(self) -> bool {
        self == Symbol::End
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        self == Symbol::Wildcard
    }

    /// Whether a pattern symbol accepts a text symbol
    #[inline]
    pub fn accepts(self, text_symbol: Symbol) -> bool {
        match self {
            Symbol::Wildcard => !text_symbol.is_end(),
            other => other == text_symbol,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::End => write!(f, "$"),
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Wildcard => write!(f, "{}", DEFAULT_WILDCARD_CHAR),
        }
    }
}

/// Render a symbol run as a string (`$` for the terminator)
pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Immutable indexed text, terminated by a single `End`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    symbols: Vec<Symbol>,
}

impl Text {
    /// Build a text from symbols, appending `End` if it is missing.
    ///
    /// Wildcards and interior terminators are rejected.
    pub fn from_symbols(mut symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.last() != Some(&Symbol::End) {
            symbols.push(Symbol::End);
        }
        let body = &symbols[..symbols.len() - 1];
        if body.iter().any(|s| s.is_end()) {
            return Err(Error::EndInText);
        }
        if body.iter().any(|s| s.is_wildcard()) {
            return Err(Error::WildcardInText);
        }
        Ok(Self { symbols })
    }

    /// Number of real symbols (terminator excluded)
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All symbols including the terminator
    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn at(&self, index: usize) -> Symbol {
        self.symbols[index]
    }

    /// Zero-copy view of `len` symbols starting at `start`
    #[inline]
    pub fn slice(&self, start: usize, len: usize) -> &[Symbol] {
        &self.symbols[start..start + len]
    }

    /// Length of the common prefix of two substrings of this text
    pub fn common_prefix(&self, a: usize, a_len: usize, b: usize, b_len: usize) -> usize {
        self.slice(a, a_len)
            .iter()
            .zip(self.slice(b, b_len))
            .take_while(|(x, y)| x == y)
            .count()
    }
}

impl From<&str> for Text {
    /// Every character becomes a literal symbol; `End` is appended.
    fn from(s: &str) -> Self {
        let mut symbols: Vec<Symbol> = s.chars().map(Symbol::Char).collect();
        symbols.push(Symbol::End);
        Self { symbols }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.symbols))
    }
}

/// A query pattern: literal symbols and wildcards, never `End`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    symbols: Vec<Symbol>,
}

impl Pattern {
    /// Parse a pattern string, mapping `wildcard_char` to [`Symbol::Wildcard`]
    pub fn parse(input: &str, wildcard_char: char) -> Self {
        let symbols = input
            .chars()
            .map(|c| if c == wildcard_char { Symbol::Wildcard } else { Symbol::Char(c) })
            .collect();
        Self { symbols }
    }

    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.iter().any(|s| s.is_end()) {
            return Err(Error::EndInPattern);
        }
        Ok(Self { symbols })
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn wildcard_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_wildcard()).count()
    }

    /// Split into the literal runs between wildcards.
    ///
    /// A pattern with `m` wildcards always yields `m + 1` segments; leading,
    /// trailing and adjacent wildcards produce empty segments.
    pub fn segments(&self) -> Vec<&[Symbol]> {
        self.symbols.split(|s| s.is_wildcard()).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_appends_terminator() {
        let text = Text::from("BANANA");
        assert_eq!(text.len(), 6);
        assert_eq!(text.symbols().len(), 7);
        assert_eq!(text.at(6), Symbol::End);
        assert_eq!(text.to_string(), "BANANA$");
    }

    #[test]
    fn test_from_symbols_keeps_single_terminator() {
        let text = Text::from_symbols(vec![Symbol::Char('A'), Symbol::End]).unwrap();
        assert_eq!(text.symbols().len(), 2);

        let err = Text::from_symbols(vec![Symbol::End, Symbol::Char('A')]).unwrap_err();
        assert!(matches!(err, Error::EndInText));

        let err = Text::from_symbols(vec![Symbol::Wildcard]).unwrap_err();
        assert!(matches!(err, Error::WildcardInText));
    }

    #[test]
    fn test_symbol_order() {
        assert!(Symbol::End < Symbol::Char('A'));
        assert!(Symbol::Char('A') < Symbol::Char('B'));
        assert!(Symbol::Char('z') < Symbol::Wildcard);
    }

    #[test]
    fn test_wildcard_never_accepts_end() {
        assert!(Symbol::Wildcard.accepts(Symbol::Char('Q')));
        assert!(!Symbol::Wildcard.accepts(Symbol::End));
        assert!(Symbol::Char('Q').accepts(Symbol::Char('Q')));
        assert!(!Symbol::Char('Q').accepts(Symbol::Char('R')));
    }

    #[test]
    fn test_segments() {
        let pattern = Pattern::parse("A*AN*", '*');
        assert_eq!(pattern.wildcard_count(), 2);
        let segments: Vec<String> = pattern.segments().iter().map(|s| render(s)).collect();
        assert_eq!(segments, vec!["A", "AN", ""]);

        let pattern = Pattern::parse("**", '*');
        assert_eq!(pattern.segments().len(), 3);
        assert!(pattern.segments().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_custom_wildcard_char() {
        let pattern = Pattern::parse("A?C*", '?');
        assert_eq!(pattern.wildcard_count(), 1);
        assert_eq!(pattern.symbols()[3], Symbol::Char('*'));
    }

    #[test]
    fn test_common_prefix() {
        let text = Text::from("BANANABANANA");
        // "ANA" at 1 vs "ANAB" at 3
        assert_eq!(text.common_prefix(1, 3, 3, 4), 3);
        assert_eq!(text.common_prefix(0, 6, 6, 6), 6);
        assert_eq!(text.common_prefix(1, 5, 0, 5), 0);
    }
}
