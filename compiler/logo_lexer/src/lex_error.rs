//! Error taxonomy for lexical analysis.
//!
//! Every failure that can escape [`scan()`](crate::Lexer::scan) is a
//! [`LexError`]: message, line, column, and a stable code derived from the
//! [`LexErrorKind`]. The position is always the **start** of the offending
//! lexeme, not the point where scanning gave up — for strings, numbers, and
//! identifiers these can differ by many characters.
//!
//! Source-context enrichment (the snippet with a column pointer) lives in
//! [`crate::report`] and does not participate in error identity: two errors
//! are equal iff kind, message, line, and column match.

use thiserror::Error;

/// What kind of lexical error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// Path missing, open failure, or read failure.
    File,
    /// Malformed `#` boolean sequence (including EOF right after `#`).
    InvalidCharacter,
    /// End of input reached before the closing `"`.
    UnclosedString,
    /// String literal exceeded the maximum length.
    StringTooLong,
    /// Numeric lexeme exceeded the maximum length while still extending.
    NumberTooLong,
    /// Identifier exceeded the maximum length while still extending.
    IdentifierTooLong,
    /// Any other failure during scanning.
    Lexical,
}

impl LexErrorKind {
    /// Stable error code.
    ///
    /// Unclosed and oversized strings share the string-literal code, as in
    /// the historical taxonomy; the kind still distinguishes them.
    pub fn code(self) -> &'static str {
        match self {
            LexErrorKind::File => "E501",
            LexErrorKind::InvalidCharacter => "E101",
            LexErrorKind::UnclosedString | LexErrorKind::StringTooLong => "E102",
            LexErrorKind::NumberTooLong => "E103",
            LexErrorKind::IdentifierTooLong => "E104",
            LexErrorKind::Lexical => "E001",
        }
    }
}

/// A lexical error with the position of the offending lexeme's start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] line {line}, column {column}: {message}", .kind.code())]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Human-readable description.
    pub message: String,
    /// 1-based line of the lexeme start (0 for file errors).
    pub line: u32,
    /// 0-based column of the lexeme start.
    pub column: u32,
}

impl LexError {
    /// General constructor.
    pub fn new(kind: LexErrorKind, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    /// Stable code for this error's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// File-level failure (no meaningful position).
    #[cold]
    pub fn file(message: impl Into<String>) -> Self {
        Self::new(LexErrorKind::File, message, 0, 0)
    }

    /// Malformed `#` sequence.
    #[cold]
    pub fn invalid_character(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::InvalidCharacter, message, line, column)
    }

    /// EOF before the closing quote.
    #[cold]
    pub fn unclosed_string(line: u32, column: u32) -> Self {
        Self::new(
            LexErrorKind::UnclosedString,
            format!("unclosed string literal, started at line {line}, column {column}"),
            line,
            column,
        )
    }

    /// String literal over the length limit.
    #[cold]
    pub fn string_too_long(max: usize, line: u32, column: u32) -> Self {
        Self::new(
            LexErrorKind::StringTooLong,
            format!("string literal exceeds maximum length of {max} characters"),
            line,
            column,
        )
    }

    /// Numeric lexeme over the length limit.
    #[cold]
    pub fn number_too_long(max: usize, line: u32, column: u32) -> Self {
        Self::new(
            LexErrorKind::NumberTooLong,
            format!("number literal exceeds maximum length of {max} characters"),
            line,
            column,
        )
    }

    /// Identifier over the length limit.
    #[cold]
    pub fn identifier_too_long(max: usize, line: u32, column: u32) -> Self {
        Self::new(
            LexErrorKind::IdentifierTooLong,
            format!("identifier exceeds maximum length of {max} characters"),
            line,
            column,
        )
    }

    /// Wrap any other failure observed during scanning.
    #[cold]
    pub fn lexical(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::Lexical, message, line, column)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
