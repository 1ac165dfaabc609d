//! Double-buffered source file reading with single-character pushback.
//!
//! The buffer owns the open file handle and exposes character-at-a-time
//! reads. Internally it keeps two chunks: the active one being consumed and
//! a prefetched one, refilled from the file in fixed-size blocks so large
//! files are never loaded wholesale into memory.
//!
//! # UTF-8 Across Block Boundaries
//!
//! Blocks are read in bytes, so a multi-byte character can be split across
//! two blocks. The trailing incomplete bytes of a block are carried over and
//! prepended to the next read. A file that ends in the middle of a character
//! is reported as [`BufferError::InvalidUtf8`].
//!
//! # Resource Discipline
//!
//! The file handle is released when the buffer is dropped (RAII) or on an
//! explicit [`close()`](SourceBuffer::close); closing twice is a no-op.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default read block size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Smallest usable block size. A UTF-8 character is at most 4 bytes; any
/// smaller block could stall on a single character.
const MIN_BUFFER_SIZE: usize = 4;

/// Failure while opening or reading the underlying source file.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A read failed mid-stream.
    #[error("read failed: {source}")]
    Read {
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file contents are not valid UTF-8 (including a file that ends in
    /// the middle of a multi-byte character).
    #[error("source is not valid UTF-8")]
    InvalidUtf8,
}

/// Double-buffered reader over an open source file.
///
/// Characters come out of three stages, in order: the pushback stack, the
/// active chunk, then the prefetched chunk (promoted on demand).
#[derive(Debug)]
pub struct SourceBuffer {
    /// Open handle; `None` after [`close()`](Self::close).
    file: Option<File>,
    /// Read block size in bytes.
    buffer_size: usize,
    /// Active chunk, consumed from `pos`.
    current: String,
    /// Byte offset of the next unread character in `current`.
    pos: usize,
    /// Prefetched chunk, promoted when `current` is exhausted.
    next: String,
    /// Trailing bytes of a UTF-8 character split across a block boundary.
    carry: Vec<u8>,
    /// Pushed-back characters, consumed before the buffers (LIFO).
    pushback: Vec<char>,
    /// Set once a read returns zero bytes.
    eof_reached: bool,
}

impl SourceBuffer {
    /// Open a source file with the default block size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        Self::with_buffer_size(path, DEFAULT_BUFFER_SIZE)
    }

    /// Open a source file with an explicit block size.
    ///
    /// The size is clamped to at least 4 bytes so a single UTF-8 character
    /// always fits in one block.
    pub fn with_buffer_size(
        path: impl AsRef<Path>,
        buffer_size: usize,
    ) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BufferError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut buffer = Self {
            file: Some(file),
            buffer_size: buffer_size.max(MIN_BUFFER_SIZE),
            current: String::new(),
            pos: 0,
            next: String::new(),
            carry: Vec::new(),
            pushback: Vec::new(),
            eof_reached: false,
        };

        // Prefetch the first block so the first read never stalls on I/O
        // inside the scanner's hot loop.
        buffer.refill()?;
        Ok(buffer)
    }

    /// Return the next character, or `None` at end of input.
    ///
    /// Once `None` has been returned, every subsequent call keeps returning
    /// `None` without touching the file again.
    pub fn next_char(&mut self) -> Result<Option<char>, BufferError> {
        if let Some(c) = self.pushback.pop() {
            return Ok(Some(c));
        }

        while self.pos >= self.current.len() {
            if self.exhausted() {
                return Ok(None);
            }
            self.refill()?;
        }

        match self.current[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(Some(c))
            }
            // Unreachable: `pos` always sits on a character boundary.
            None => Ok(None),
        }
    }

    /// Make the next [`next_char()`](Self::next_char) call return `c` again.
    ///
    /// Pushbacks stack: pushing `a` then `b` yields `b` then `a`.
    pub fn push_back(&mut self, c: char) {
        self.pushback.push(c);
    }

    /// Consume characters up to, but not including, the next `\n`.
    ///
    /// Returns the number of characters consumed. The newline itself (if
    /// any) stays in the buffer so the caller can account for it through
    /// its normal read path. Uses `memchr` to scan whole chunks at a time;
    /// this is the comment-skipping fast path.
    pub fn skip_to_newline(&mut self) -> Result<usize, BufferError> {
        let mut skipped = 0;

        // Pushed-back characters first.
        while let Some(&c) = self.pushback.last() {
            if c == '\n' {
                return Ok(skipped);
            }
            self.pushback.pop();
            skipped += 1;
        }

        loop {
            while self.pos >= self.current.len() {
                if self.exhausted() {
                    return Ok(skipped);
                }
                self.refill()?;
            }

            let rest = &self.current[self.pos..];
            match memchr::memchr(b'\n', rest.as_bytes()) {
                Some(offset) => {
                    // `\n` is ASCII, so `offset` is a character boundary.
                    skipped += rest[..offset].chars().count();
                    self.pos += offset;
                    return Ok(skipped);
                }
                None => {
                    skipped += rest.chars().count();
                    self.pos = self.current.len();
                }
            }
        }
    }

    /// Release the underlying file handle.
    ///
    /// Idempotent: closing an already-closed buffer does nothing. After
    /// close, no further data is read from disk; already-buffered
    /// characters are discarded and reads return `None`.
    pub fn close(&mut self) {
        self.file = None;
        self.eof_reached = true;
        self.current.clear();
        self.pos = 0;
        self.next.clear();
        self.carry.clear();
        self.pushback.clear();
    }

    /// Whether the file handle has been released.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// True when no more characters can come out of the buffers or the file.
    fn exhausted(&self) -> bool {
        self.eof_reached && self.next.is_empty()
    }

    /// Promote the prefetched chunk and read the next block from the file.
    fn refill(&mut self) -> Result<(), BufferError> {
        if !self.next.is_empty() {
            self.current = std::mem::take(&mut self.next);
            self.pos = 0;
        }

        if self.eof_reached {
            return Ok(());
        }
        let Some(file) = self.file.as_mut() else {
            self.eof_reached = true;
            return Ok(());
        };

        let mut block = vec![0u8; self.buffer_size];
        let n = file
            .read(&mut block)
            .map_err(|source| BufferError::Read { source })?;

        if n == 0 {
            self.eof_reached = true;
            if self.carry.is_empty() {
                return Ok(());
            }
            // The file ended in the middle of a multi-byte character.
            self.carry.clear();
            return Err(BufferError::InvalidUtf8);
        }

        let mut data = std::mem::take(&mut self.carry);
        data.extend_from_slice(&block[..n]);

        match String::from_utf8(data) {
            Ok(chunk) => self.next = chunk,
            Err(err) => {
                let utf8_err = err.utf8_error();
                if utf8_err.error_len().is_some() {
                    return Err(BufferError::InvalidUtf8);
                }
                // Incomplete trailing character: keep the valid prefix and
                // carry the tail bytes into the next block.
                let valid = utf8_err.valid_up_to();
                let mut data = err.into_bytes();
                self.carry = data.split_off(valid);
                self.next =
                    String::from_utf8(data).map_err(|_| BufferError::InvalidUtf8)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
