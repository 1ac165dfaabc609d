//! The token-recognition state machine.
//!
//! [`Lexer`] owns one [`SourceBuffer`], one [`PositionTracker`], one
//! [`ReservedWords`] table, and one statistics collector; all four are
//! created together and torn down together. Sessions share no mutable
//! state, so independent files can be tokenized on separate threads with
//! no locking.
//!
//! # Dispatch
//!
//! [`scan()`](Lexer::scan) skips whitespace and `%` comments, then
//! dispatches on the first significant character. Operators that prefix a
//! longer operator (`<`, `>`, `:`) read one character of lookahead and
//! retract it if it doesn't extend the operator; the retraction goes
//! through the position tracker so error positions stay exact.
//!
//! # Failure policy
//!
//! Every error carries the line/column of the *start* of the offending
//! lexeme. Buffer failures mid-scan are wrapped into the same [`LexError`]
//! family, so `scan()` has a single error surface.

use std::path::Path;

use logo_lexer_core::{BufferError, PositionTracker, SourceBuffer, DEFAULT_BUFFER_SIZE};

use crate::lex_error::{LexError, LexErrorKind};
use crate::reserved::ReservedWords;
use crate::stats::{LexerStatistics, StatsSnapshot};
use crate::token::{Tag, Token};

/// Per-class lexeme length limits.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum identifier length in characters.
    pub max_identifier: usize,
    /// Maximum numeric lexeme length in characters (digits plus dot).
    pub max_number: usize,
    /// Maximum string literal length in characters, quotes included.
    pub max_string: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_identifier: 255,
            max_number: 100,
            max_string: 10_000,
        }
    }
}

/// Start of the lexeme currently being scanned: `(line, column)`.
type LexemeStart = (u32, u32);

/// A lexer session over one source file.
#[derive(Debug)]
pub struct Lexer {
    buffer: SourceBuffer,
    position: PositionTracker,
    reserved: ReservedWords,
    statistics: LexerStatistics,
    limits: Limits,
}

impl Lexer {
    /// Open a session with the default read block size (4096 bytes).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LexError> {
        Self::open_with_buffer_size(path, DEFAULT_BUFFER_SIZE)
    }

    /// Open a session with an explicit read block size.
    pub fn open_with_buffer_size(
        path: impl AsRef<Path>,
        buffer_size: usize,
    ) -> Result<Self, LexError> {
        let path = path.as_ref();
        let buffer = SourceBuffer::with_buffer_size(path, buffer_size)
            .map_err(|err| LexError::file(err.to_string()))?;
        tracing::debug!(path = %path.display(), buffer_size, "lexer session opened");
        Ok(Self {
            buffer,
            position: PositionTracker::new(),
            reserved: ReservedWords::new(),
            statistics: LexerStatistics::new(),
            limits: Limits::default(),
        })
    }

    /// Replace the default length limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Current line, 1-based, after the most recently returned token.
    pub fn line(&self) -> u32 {
        self.position.line()
    }

    /// Current column, 0-based, after the most recently returned token.
    pub fn column(&self) -> u32 {
        self.position.column()
    }

    /// Observational statistics snapshot. Never affects scanning.
    pub fn statistics(&self) -> StatsSnapshot {
        self.statistics
            .snapshot(self.position.line(), self.position.max_column())
    }

    /// Tear the session down, releasing the file handle.
    ///
    /// Idempotent; the handle is also released on drop.
    pub fn close(&mut self) {
        if !self.buffer.is_closed() {
            tracing::debug!("lexer session closed");
        }
        self.buffer.close();
    }

    /// Produce the next token.
    ///
    /// Returns the EOF token once the source is exhausted, and keeps
    /// returning it on subsequent calls without touching the file again.
    pub fn scan(&mut self) -> Result<Token, LexError> {
        match self.scan_token() {
            Ok(token) => {
                self.statistics.record_token(&token);
                Ok(token)
            }
            Err(error) => {
                tracing::debug!(%error, "lexical error");
                self.statistics.record_error(&error);
                Err(error)
            }
        }
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(c) = self.next_char()? else {
                return Ok(Token::eof());
            };
            if c.is_whitespace() {
                continue;
            }
            if c == '%' {
                self.skip_comment()?;
                continue;
            }

            let start = self.lexeme_start();
            return match c {
                '<' => self.less_than(),
                '>' => self.greater_than(),
                '#' => self.boolean(start),
                ':' => self.colon(),
                '"' => self.string_literal(start),
                '.' => self.dot_or_number(start),
                _ if c.is_ascii_digit() => self.number(c, None, start),
                _ if c.is_alphabetic() || c == '_' => self.identifier(c, start),
                _ => Ok(Token::char(c)),
            };
        }
    }

    /// Position of the character just consumed (the lexeme's first).
    fn lexeme_start(&self) -> LexemeStart {
        (self.position.line(), self.position.column().saturating_sub(1))
    }

    // ─── Comments ────────────────────────────────────────────────────────

    /// Skip from a `%` to the end of the line (or end of input).
    ///
    /// The body is consumed in bulk via the buffer's memchr fast path; the
    /// newline itself goes through the normal read path so line accounting
    /// stays in one place.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let skipped = self
            .buffer
            .skip_to_newline()
            .map_err(|err| self.buffer_error(&err))?;
        self.position
            .advance_columns(u32::try_from(skipped).unwrap_or(u32::MAX));
        self.statistics.record_chars(skipped as u64);
        self.next_char()?;
        Ok(())
    }

    // ─── Operators ───────────────────────────────────────────────────────

    fn less_than(&mut self) -> Result<Token, LexError> {
        let next = self.next_char()?;
        match next {
            Some('=') => Ok(Token::text(Tag::Leq, "<=")),
            Some('>') => Ok(Token::text(Tag::Neq, "<>")),
            _ => {
                self.push_back(next);
                Ok(Token::char('<'))
            }
        }
    }

    fn greater_than(&mut self) -> Result<Token, LexError> {
        let next = self.next_char()?;
        match next {
            Some('=') => Ok(Token::text(Tag::Geq, ">=")),
            _ => {
                self.push_back(next);
                Ok(Token::char('>'))
            }
        }
    }

    fn colon(&mut self) -> Result<Token, LexError> {
        let next = self.next_char()?;
        match next {
            Some('=') => Ok(Token::text(Tag::Assign, ":=")),
            _ => {
                self.push_back(next);
                Ok(Token::char(':'))
            }
        }
    }

    // ─── Booleans ────────────────────────────────────────────────────────

    /// `#` must be followed by `T`/`t` or `F`/`f`; anything else (or end of
    /// input) is an invalid-character error at the `#`.
    fn boolean(&mut self, start: LexemeStart) -> Result<Token, LexError> {
        match self.next_char()? {
            Some('T' | 't') => Ok(Token::text(Tag::True, "#T")),
            Some('F' | 'f') => Ok(Token::text(Tag::False, "#F")),
            Some(c) => Err(LexError::invalid_character(
                format!("invalid character after '#': '{c}'"),
                start.0,
                start.1,
            )),
            None => Err(LexError::invalid_character(
                "unexpected end of input after '#'",
                start.0,
                start.1,
            )),
        }
    }

    // ─── Strings ─────────────────────────────────────────────────────────

    /// Consume a string literal verbatim, including both delimiting quotes.
    fn string_literal(&mut self, start: LexemeStart) -> Result<Token, LexError> {
        let mut text = String::from('"');
        let mut length = 1usize;

        while length < self.limits.max_string {
            let Some(c) = self.next_char()? else {
                return Err(LexError::unclosed_string(start.0, start.1));
            };
            text.push(c);
            length += 1;
            if c == '"' {
                return Ok(Token::text(Tag::Str, text));
            }
        }
        Err(LexError::string_too_long(
            self.limits.max_string,
            start.0,
            start.1,
        ))
    }

    // ─── Numbers ─────────────────────────────────────────────────────────

    /// A `.` starts a number only when a digit immediately follows;
    /// otherwise it is retracted and the `.` is an ordinary
    /// single-character token.
    fn dot_or_number(&mut self, start: LexemeStart) -> Result<Token, LexError> {
        let next = self.next_char()?;
        match next {
            Some(d) if d.is_ascii_digit() => self.number('.', Some(d), start),
            _ => {
                self.push_back(next);
                Ok(Token::char('.'))
            }
        }
    }

    /// Accumulate a number: integer part digit-by-digit, then a fractional
    /// part with a decreasing power-of-ten factor. The number is
    /// integer-valued iff no `.` was consumed.
    ///
    /// The length limit counts every consumed character (digits and dot).
    /// Hitting the limit with another digit or dot pending is a
    /// number-too-long error at the lexeme start; hitting it at a natural
    /// boundary is not an error.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "integral values stay within 10^100, truncation toward zero is the contract"
    )]
    fn number(
        &mut self,
        first: char,
        leading_dot_digit: Option<char>,
        start: LexemeStart,
    ) -> Result<Token, LexError> {
        let max = self.limits.max_number;
        let mut factor = 0.1_f64;
        let mut value: f64;
        let mut integral: bool;
        let mut length: usize;
        let mut next: Option<char>;

        if let Some(d) = leading_dot_digit {
            debug_assert_eq!(first, '.');
            integral = false;
            value = f64::from(digit(d)) * factor;
            factor *= 0.1;
            length = 2;
            next = self.next_char()?;
        } else {
            integral = true;
            value = f64::from(digit(first));
            length = 1;
            next = self.next_char()?;

            while let Some(c) = next {
                if !c.is_ascii_digit() {
                    break;
                }
                if length >= max {
                    return Err(LexError::number_too_long(max, start.0, start.1));
                }
                value = value * 10.0 + f64::from(digit(c));
                length += 1;
                next = self.next_char()?;
            }

            if next == Some('.') {
                if length >= max {
                    return Err(LexError::number_too_long(max, start.0, start.1));
                }
                integral = false;
                length += 1;
                next = self.next_char()?;
            }
        }

        if !integral {
            while let Some(c) = next {
                if !c.is_ascii_digit() {
                    break;
                }
                if length >= max {
                    return Err(LexError::number_too_long(max, start.0, start.1));
                }
                value += f64::from(digit(c)) * factor;
                factor *= 0.1;
                length += 1;
                next = self.next_char()?;
            }
        }

        self.push_back(next);
        Ok(if integral {
            Token::int(value as i64)
        } else {
            Token::float(value)
        })
    }

    // ─── Identifiers ─────────────────────────────────────────────────────

    /// Accumulate an identifier, resolve it against the reserved-word
    /// table, and cache it as an `ID` token on a miss.
    ///
    /// At exactly the length limit, one character of lookahead decides
    /// between a clean stop (next character can't extend the identifier)
    /// and an identifier-too-long error.
    fn identifier(&mut self, first: char, start: LexemeStart) -> Result<Token, LexError> {
        let max = self.limits.max_identifier;
        let mut lexeme = String::new();
        lexeme.push(first);
        let mut length = 1usize;

        loop {
            if length >= max {
                let next = self.next_char()?;
                self.push_back(next);
                if next.is_some_and(is_identifier_continue) {
                    return Err(LexError::identifier_too_long(max, start.0, start.1));
                }
                break;
            }
            let next = self.next_char()?;
            match next {
                Some(c) if is_identifier_continue(c) => {
                    lexeme.push(c);
                    length += 1;
                }
                _ => {
                    self.push_back(next);
                    break;
                }
            }
        }

        if let Some(token) = self.reserved.lookup(&lexeme) {
            return Ok(token.clone());
        }
        let token = Token::text(Tag::Id, lexeme.to_uppercase());
        self.reserved.insert(&lexeme, token.clone());
        Ok(token)
    }

    // ─── Character plumbing ──────────────────────────────────────────────

    /// Read one character, keeping position and statistics in step.
    fn next_char(&mut self) -> Result<Option<char>, LexError> {
        match self.buffer.next_char() {
            Ok(Some(c)) => {
                self.position.advance(c);
                self.statistics.record_char(c);
                Ok(Some(c))
            }
            Ok(None) => Ok(None),
            Err(err) => Err(self.buffer_error(&err)),
        }
    }

    /// Retract one character, exactly inverting [`next_char`](Self::next_char).
    fn push_back(&mut self, c: Option<char>) {
        if let Some(c) = c {
            self.position.retreat(c);
            self.statistics.unrecord_char(c);
            self.buffer.push_back(c);
        }
    }

    /// Wrap a buffer failure into the lexical error family at the current
    /// position.
    fn buffer_error(&self, err: &BufferError) -> LexError {
        LexError::new(
            LexErrorKind::File,
            err.to_string(),
            self.position.line(),
            self.position.column(),
        )
    }
}

/// Digit value of an ASCII digit character (0 for anything else; callers
/// dispatch on `is_ascii_digit` first).
fn digit(c: char) -> u32 {
    c.to_digit(10).unwrap_or(0)
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
