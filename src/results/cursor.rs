//! Row cursor shared by every result kind
//!
//! The position ranges over `[-1, len]`: `-1` is before the first row,
//! `len` is after the last one, and `[0, len)` are data rows.

use super::{ResultSetError, ResultSetResult};

/// Position before the first row
pub const BEFORE_FIRST: isize = -1;

/// Bidirectional, randomly addressable cursor over `len` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: isize,
    len: usize,
}

impl Cursor {
    /// Create a cursor positioned before the first row
    pub fn new(len: usize) -> Self {
        Self {
            position: BEFORE_FIRST,
            len,
        }
    }

    /// Raw position in `[-1, len]`
    pub fn position(&self) -> isize {
        self.position
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn end(&self) -> isize {
        self.len as isize
    }

    fn on_row(&self) -> bool {
        self.position > BEFORE_FIRST && self.position < self.end()
    }

    /// Zero-based index of the current row, if on one
    pub fn current(&self) -> Option<usize> {
        if self.on_row() {
            Some(self.position as usize)
        } else {
            None
        }
    }

    /// Move to the first row
    pub fn first(&mut self) -> bool {
        self.position = 0;
        self.on_row()
    }

    /// Move to the last row
    pub fn last(&mut self) -> bool {
        self.position = self.end() - 1;
        self.on_row()
    }

    pub fn before_first(&mut self) {
        self.position = BEFORE_FIRST;
    }

    pub fn after_last(&mut self) {
        self.position = self.end();
    }

    /// Advance one row; moving past after-last is an error and leaves the
    /// cursor where it was
    pub fn next(&mut self) -> ResultSetResult<bool> {
        if self.position + 1 > self.end() {
            return Err(ResultSetError::BeyondEnd);
        }
        self.position += 1;
        Ok(self.on_row())
    }

    /// Step back one row; moving before before-first is an error and leaves
    /// the cursor where it was
    pub fn previous(&mut self) -> ResultSetResult<bool> {
        if self.position - 1 < BEFORE_FIRST {
            return Err(ResultSetError::BeforeStart);
        }
        self.position -= 1;
        Ok(self.on_row())
    }

    /// Jump to a 1-based row, or count back from the end when negative
    ///
    /// `0` lands before the first row. The target is clamped into range.
    pub fn absolute(&mut self, row: isize) -> bool {
        let target = if row >= 0 { row - 1 } else { self.end() + row };
        self.position = self.clamp(target);
        self.on_row()
    }

    /// Move by `delta` rows, clamped into range
    pub fn relative(&mut self, delta: isize) -> bool {
        let target = self.position.saturating_add(delta);
        self.position = self.clamp(target);
        self.on_row()
    }

    fn clamp(&self, target: isize) -> isize {
        target.clamp(BEFORE_FIRST, self.end())
    }

    /// 1-based row number, or 0 when not on a row
    pub fn row(&self) -> usize {
        self.current().map_or(0, |i| i + 1)
    }

    pub fn is_before_first(&self) -> bool {
        self.len > 0 && self.position == BEFORE_FIRST
    }

    pub fn is_after_last(&self) -> bool {
        self.len > 0 && self.position == self.end()
    }

    pub fn is_first(&self) -> bool {
        self.len > 0 && self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.len > 0 && self.position == self.end() - 1
    }
}
