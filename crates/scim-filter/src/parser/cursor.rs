//! Character cursor over the parser input.

/// A read position over a fully materialized input string.
///
/// Offsets count characters, not bytes, so they can be reported to users
/// as is.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    position: usize,
    mark: usize,
}

impl Cursor {
    /// Creates a cursor at the start of `input`.
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
            mark: 0,
        }
    }

    /// Consumes and returns the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = self.chars.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Steps back over the character returned by the last `read`.
    pub fn unread(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Remembers the current position. A later `mark` replaces it.
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// Returns to the marked position.
    pub fn reset(&mut self) {
        self.position = self.mark;
    }

    /// Advances up to `n` characters, returning how many were skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let skipped = n.min(self.chars.len() - self.position);
        self.position += skipped;
        skipped
    }

    /// The offset of the next character to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The marked offset.
    pub fn mark_position(&self) -> usize {
        self.mark
    }

    /// Returns true once every character has been read.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// The unread part of the input.
    pub fn remaining(&self) -> String {
        self.chars[self.position..].iter().collect()
    }
}
