//! Observational statistics for a lexer session.
//!
//! The collector is a pure observer: the scanner reports tokens, errors,
//! and consumed characters to it, and it never feeds anything back into
//! tokenization decisions. Pushing a character back decrements the
//! character (and, for newlines, line) counters so the totals reflect what
//! was actually consumed.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::lex_error::LexError;
use crate::token::Token;

/// Floor for rate computations so an instant scan doesn't divide by zero.
const MIN_ELAPSED_SECS: f64 = 0.001;

/// Running counters, owned by one lexer session.
#[derive(Debug)]
pub(crate) struct LexerStatistics {
    started: Instant,
    token_count: u64,
    token_kinds: FxHashMap<String, u64>,
    errors: Vec<String>,
    char_count: u64,
    line_count: u64,
}

impl LexerStatistics {
    pub(crate) fn new() -> Self {
        Self {
            started: Instant::now(),
            token_count: 0,
            token_kinds: FxHashMap::default(),
            errors: Vec::new(),
            char_count: 0,
            line_count: 0,
        }
    }

    pub(crate) fn record_token(&mut self, token: &Token) {
        self.token_count += 1;
        *self.token_kinds.entry(token.tag().label()).or_insert(0) += 1;
    }

    pub(crate) fn record_error(&mut self, error: &LexError) {
        self.errors.push(error.to_string());
    }

    pub(crate) fn record_char(&mut self, c: char) {
        self.char_count += 1;
        if c == '\n' {
            self.line_count += 1;
        }
    }

    /// Bulk character count for the comment fast path (no newlines inside).
    pub(crate) fn record_chars(&mut self, n: u64) {
        self.char_count += n;
    }

    pub(crate) fn unrecord_char(&mut self, c: char) {
        self.char_count = self.char_count.saturating_sub(1);
        if c == '\n' {
            self.line_count = self.line_count.saturating_sub(1);
        }
    }

    pub(crate) fn snapshot(&self, lines: u32, max_column: u32) -> StatsSnapshot {
        let elapsed = self.started.elapsed();
        let secs = elapsed.as_secs_f64().max(MIN_ELAPSED_SECS);
        StatsSnapshot {
            token_count: self.token_count,
            token_kinds: self
                .token_kinds
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            error_count: self.errors.len() as u64,
            errors: self.errors.clone(),
            char_count: self.char_count,
            line_count: self.line_count,
            elapsed,
            tokens_per_second: self.token_count as f64 / secs,
            chars_per_second: self.char_count as f64 / secs,
            lines,
            max_column,
        }
    }
}

/// Point-in-time view of a session's statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Tokens returned by `scan()` so far (including the EOF token).
    pub token_count: u64,
    /// Count per token kind, keyed by the kind's canonical label.
    pub token_kinds: BTreeMap<String, u64>,
    /// Errors raised so far.
    pub error_count: u64,
    /// Rendered messages of the errors raised so far.
    pub errors: Vec<String>,
    /// Characters consumed (net of pushback).
    pub char_count: u64,
    /// Newlines consumed (net of pushback).
    pub line_count: u64,
    /// Wall-clock time since the session opened.
    pub elapsed: Duration,
    /// Tokens per second over the session lifetime.
    pub tokens_per_second: f64,
    /// Characters per second over the session lifetime.
    pub chars_per_second: f64,
    /// Current line of the position tracker.
    pub lines: u32,
    /// Widest column seen by the position tracker.
    pub max_column: u32,
}
