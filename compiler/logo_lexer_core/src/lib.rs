//! Low-level character acquisition for the Logo lexer.
//!
//! This crate is standalone: it knows nothing about tokens, reserved words,
//! or the error taxonomy of the scanner above it. It provides exactly two
//! building blocks:
//!
//! - [`SourceBuffer`] — double-buffered file reading with single-character
//!   pushback. The scanner never looks more than one character ahead before
//!   deciding to retract, so pushback depth 1 is sufficient (the buffer
//!   supports more).
//! - [`PositionTracker`] — line/column bookkeeping whose `retreat` exactly
//!   inverts its `advance`, which is what makes pushback safe for error
//!   positions.
//!
//! The integration layer (`logo_lexer`) wires both into its own error
//! family; this crate reports only [`BufferError`] values.

pub mod position;
pub mod source_buffer;

pub use position::PositionTracker;
pub use source_buffer::{BufferError, SourceBuffer, DEFAULT_BUFFER_SIZE};
