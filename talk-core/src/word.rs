//! Word buffer: the message in progress, with a word-boundary marker
//!
//! The marker records where the token currently being typed starts. It
//! feeds short-code detection and keeps compaction from ever cutting a
//! word in half.

use crate::types::StoreError;
use heapless::String;

/// Compaction discards the prefix up to and including the first space at
/// or after this offset
pub const COMPACT_MIN_OFFSET: usize = 20;

/// Bounded, append-mostly text buffer with one end-of-text cursor and one
/// word-boundary marker
#[derive(Debug, Default)]
pub struct WordBuffer<const N: usize> {
    buf: String<N>,
    marker: usize,
}

impl<const N: usize> WordBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            marker: 0,
        }
    }

    /// Append one character; a full buffer rejects the append
    pub fn append(&mut self, c: char) -> Result<(), StoreError> {
        self.buf.push(c).map_err(|_| StoreError::CapacityExceeded)
    }

    /// Append `text` plus a single trailing space, as a unit: on
    /// insufficient capacity nothing is written
    pub fn append_token(&mut self, text: &str) -> Result<(), StoreError> {
        if self.buf.len() + text.len() + 1 > N {
            return Err(StoreError::CapacityExceeded);
        }
        // capacity was checked above
        let _ = self.buf.push_str(text);
        let _ = self.buf.push(' ');
        self.marker = self.buf.len();
        Ok(())
    }

    /// Replace the in-progress token (marker to end) with `text` plus a
    /// trailing space, as a unit. Used for short-code expansion.
    pub fn replace_current_token(&mut self, text: &str) -> Result<(), StoreError> {
        if self.marker + text.len() + 1 > N {
            return Err(StoreError::CapacityExceeded);
        }
        self.buf.truncate(self.marker);
        let _ = self.buf.push_str(text);
        let _ = self.buf.push(' ');
        self.marker = self.buf.len();
        Ok(())
    }

    /// Remove the last character. Emptying the buffer resets the
    /// word-boundary marker too.
    pub fn backspace(&mut self) -> Option<char> {
        let c = self.buf.pop()?;
        if self.buf.is_empty() {
            self.marker = 0;
        } else if self.marker > self.buf.len() {
            self.marker = self.buf.len();
        }
        Some(c)
    }

    /// Record the current end of text as the start of a new word
    pub fn mark_word_boundary(&mut self) {
        self.marker = self.buf.len();
    }

    /// Commit a space and start a new word
    pub fn commit_space(&mut self) -> Result<(), StoreError> {
        self.append(' ')?;
        self.mark_word_boundary();
        Ok(())
    }

    /// The word in progress: text from the word-boundary marker to the
    /// end, with separator characters stripped
    pub fn current_token(&self) -> String<N> {
        self.buf[self.marker..].chars().filter(|c| *c != ' ').collect()
    }

    /// Discard the prefix up to and including the first space at or after
    /// `min_offset`, re-basing the marker. Returns the number of bytes
    /// dropped; a buffer with no such space is left alone, so a word is
    /// never split.
    ///
    /// The dropped prefix has already been consumed by the display and
    /// speech collaborators.
    pub fn compact(&mut self, min_offset: usize) -> usize {
        let bytes = self.buf.as_bytes();
        let Some(pos) = bytes
            .iter()
            .skip(min_offset)
            .position(|&b| b == b' ')
            .map(|p| p + min_offset)
        else {
            return 0;
        };

        let dropped = pos + 1;
        let mut rest: String<N> = String::new();
        // strictly shorter than the original, always fits
        let _ = rest.push_str(&self.buf[dropped..]);
        self.buf = rest;
        self.marker = self.marker.saturating_sub(dropped);
        dropped
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn marker(&self) -> usize {
        self.marker
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.marker = 0;
    }
}
