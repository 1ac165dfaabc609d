//! Lexical analysis for the Logo turtle-graphics dialect.
//!
//! This crate turns a Logo source file into a stream of classified tokens.
//! A [`Lexer`] session owns the open file, streams it in fixed-size blocks
//! through [`logo_lexer_core::SourceBuffer`], and resolves keywords through
//! a per-session [`ReservedWords`] table, so independent files can be
//! tokenized concurrently with no shared state.
//!
//! # Pipeline position
//!
//! ```text
//! source file ──► logo_lexer (this crate) ──► token stream ──► parser
//! ```
//!
//! # Example
//!
//! ```no_run
//! use logo_lexer::Lexer;
//!
//! # fn main() -> Result<(), logo_lexer::LexError> {
//! let mut lexer = Lexer::open("spiral.logo")?;
//! loop {
//!     let token = lexer.scan()?;
//!     if token.is_eof() {
//!         break;
//!     }
//!     println!("{token}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod lex_error;
pub mod lexer;
pub mod report;
pub mod reserved;
pub mod stats;
pub mod token;

pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{Lexer, Limits};
pub use reserved::ReservedWords;
pub use stats::StatsSnapshot;
pub use token::{Tag, Token, Value};
