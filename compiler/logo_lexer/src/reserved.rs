//! Case-insensitive reserved-word table with identifier caching.
//!
//! The table is pre-seeded with every keyword and its aliases (`FORWARD`
//! and `FD` both resolve to the `FORWARD` token). It also doubles as the
//! session's identifier cache: the first time a free identifier is seen,
//! its `ID` token is inserted under the uppercased lexeme so later
//! occurrences reuse the same tag/value pair.
//!
//! Each lexer session owns its own table — there is no shared or global
//! instance, so concurrent sessions cannot interfere.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::token::{Tag, Token};

/// Keywords with aliases, mapped to one canonical token each.
const ALIASED_KEYWORDS: &[(&[&str], Tag, &str)] = &[
    (&["FORWARD", "FD"], Tag::Forward, "FORWARD"),
    (&["BACKWARD", "BK"], Tag::Backward, "BACKWARD"),
    (&["RIGHT", "RT"], Tag::Right, "RIGHT"),
    (&["LEFT", "LT"], Tag::Left, "LEFT"),
    (&["CLEAR", "CLS"], Tag::Clear, "CLEAR"),
    (&["PENUP", "PU"], Tag::PenUp, "PENUP"),
    (&["PENDOWN", "PD"], Tag::PenDown, "PENDOWN"),
];

/// Keywords with a single spelling.
const PLAIN_KEYWORDS: &[(&str, Tag)] = &[
    ("VAR", Tag::Var),
    ("SETX", Tag::SetX),
    ("SETY", Tag::SetY),
    ("SETXY", Tag::SetXy),
    ("HOME", Tag::Home),
    ("CIRCLE", Tag::Circle),
    ("ARC", Tag::Arc),
    ("COLOR", Tag::Color),
    ("PENWIDTH", Tag::PenWidth),
    ("PRINT", Tag::Print),
    ("WHILE", Tag::While),
    ("IF", Tag::If),
    ("IFELSE", Tag::IfElse),
    ("AND", Tag::And),
    ("OR", Tag::Or),
    ("MOD", Tag::Mod),
];

/// Mapping from uppercased lexeme to its token.
#[derive(Debug, Clone)]
pub struct ReservedWords {
    words: FxHashMap<String, Token>,
    /// Uppercased lexemes that entered the table as free identifiers
    /// (as opposed to pre-seeded keywords).
    cached_identifiers: FxHashSet<String>,
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservedWords {
    /// Table pre-seeded with every keyword and alias.
    pub fn new() -> Self {
        let mut words = FxHashMap::default();
        for (lexemes, tag, canonical) in ALIASED_KEYWORDS {
            for lexeme in *lexemes {
                words.insert((*lexeme).to_owned(), Token::text(*tag, *canonical));
            }
        }
        for (lexeme, tag) in PLAIN_KEYWORDS {
            words.insert((*lexeme).to_owned(), Token::text(*tag, *lexeme));
        }
        Self {
            words,
            cached_identifiers: FxHashSet::default(),
        }
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, lexeme: &str) -> Option<&Token> {
        self.words.get(&lexeme.to_uppercase())
    }

    /// Cache a token under the uppercased lexeme.
    ///
    /// Used by the scanner to memoize free identifiers within a session.
    pub fn insert(&mut self, lexeme: &str, token: Token) {
        let upper = lexeme.to_uppercase();
        self.cached_identifiers.insert(upper.clone());
        self.words.insert(upper, token);
    }

    /// Whether the lexeme resolves to anything (keyword or cached identifier).
    pub fn contains(&self, lexeme: &str) -> bool {
        self.words.contains_key(&lexeme.to_uppercase())
    }

    /// Whether the lexeme entered the table as a free identifier.
    pub fn is_cached_identifier(&self, lexeme: &str) -> bool {
        self.cached_identifiers.contains(&lexeme.to_uppercase())
    }

    /// Number of entries (keywords, aliases, and cached identifiers).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: the table is seeded at construction.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
