//! Line/column tracking that stays consistent under pushback.
//!
//! [`advance`](PositionTracker::advance) and
//! [`retreat`](PositionTracker::retreat) are exact inverses: for any
//! sequence of advances followed by the matching retreats in reverse order,
//! the tracker returns to its starting position. The tricky case is pushing
//! back a newline, which must restore the column the previous line had, not
//! just reset to zero; the tracker remembers pre-newline columns on an
//! internal stack for exactly this.

/// Current position in the source: `line` is 1-based, `column` is 0-based
/// within the line.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    line: u32,
    column: u32,
    /// Columns the previous lines had before their newline was consumed,
    /// popped when a newline is pushed back.
    newline_columns: Vec<u32>,
    /// Widest column seen so far (statistics only).
    max_column: u32,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionTracker {
    /// Start at line 1, column 0.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 0,
            newline_columns: Vec::new(),
            max_column: 0,
        }
    }

    /// Account for one consumed character.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.newline_columns.push(self.column);
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
            if self.column > self.max_column {
                self.max_column = self.column;
            }
        }
    }

    /// Exactly undo the last [`advance`](Self::advance) for `c`.
    ///
    /// For a newline this pops the remembered pre-newline column (floor 0 if
    /// the stack is somehow empty); for anything else the column decrements,
    /// never below 0.
    pub fn retreat(&mut self, c: char) {
        if c == '\n' {
            self.line = self.line.saturating_sub(1).max(1);
            self.column = self.newline_columns.pop().unwrap_or(0);
        } else {
            self.column = self.column.saturating_sub(1);
        }
    }

    /// Bulk column advance for `n` non-newline characters.
    ///
    /// Used by the comment fast path, where the skipped run is known to
    /// contain no newline and is never pushed back.
    pub fn advance_columns(&mut self, n: u32) {
        self.column += n;
        if self.column > self.max_column {
            self.max_column = self.column;
        }
    }

    /// Current line, 1-based.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column within the line, 0-based.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Widest column seen so far.
    pub fn max_column(&self) -> u32 {
        self.max_column
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
