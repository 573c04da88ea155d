use std::fmt;
use std::ops::RangeInclusive;

use ropey::Rope;

use crate::error::EditError;

/// Insertion point into a [`MarkupBuffer`].
///
/// Offsets count characters, not bytes. Offset `n` sits between character
/// `n - 1` and character `n`. The raw value `-1` is a sentinel meaning
/// "before the first character": inserting there prepends, but unlike
/// offset `0` the cursor is then left one position short of the inserted
/// text's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cursor(isize);

impl Cursor {
    /// The before-first-character sentinel.
    pub const BEFORE_START: Self = Self(-1);

    /// Cursor at a character offset.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn at(offset: usize) -> Self {
        Self(offset as isize)
    }

    /// Raw signed value (`-1` for the sentinel).
    pub const fn get(self) -> isize {
        self.0
    }

    pub const fn is_before_start(self) -> bool {
        self.0 < 0
    }

    /// Character offset, or `None` for the sentinel.
    #[allow(clippy::cast_sign_loss)]
    pub const fn offset(self) -> Option<usize> {
        if self.0 < 0 { None } else { Some(self.0 as usize) }
    }

    /// Where text is spliced for this cursor: the sentinel splices at 0.
    pub const fn splice_offset(self) -> usize {
        match self.offset() {
            Some(offset) => offset,
            None => 0,
        }
    }

    /// Shift by a signed amount without any range check.
    pub(crate) const fn shifted(self, delta: isize) -> Self {
        Self(self.0 + delta)
    }

    #[allow(clippy::cast_possible_wrap)]
    pub(crate) const fn advanced(self, count: usize) -> Self {
        Self(self.0 + count as isize)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw markup text backed by a rope.
///
/// Every editing operation produces a new buffer instead of mutating in
/// place. Cloning a rope shares its nodes, so a new buffer costs roughly
/// the size of the edit rather than the size of the text.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MarkupBuffer {
    rope: Rope,
}

impl MarkupBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Character at an offset, `None` past the end.
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    /// Like [`Self::char_at`] but for a signed index; negatives yield `None`.
    pub fn char_at_signed(&self, idx: isize) -> Option<char> {
        usize::try_from(idx).ok().and_then(|idx| self.char_at(idx))
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Nearest `target` at or before `from` (clamped to the last character).
    pub fn rfind_from(&self, from: usize, target: char) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        (0..=from.min(last))
            .rev()
            .find(|&idx| self.char_at(idx) == Some(target))
    }

    /// First `target` at or after `from`.
    pub fn find_from(&self, from: usize, target: char) -> Option<usize> {
        (from..self.len()).find(|&idx| self.char_at(idx) == Some(target))
    }

    /// New buffer with `text` inserted between characters `at - 1` and `at`.
    ///
    /// Offsets past the end append.
    pub fn spliced(&self, at: usize, text: &str) -> Self {
        let mut rope = self.rope.clone();
        rope.insert(at.min(rope.len_chars()), text);
        Self { rope }
    }

    /// New buffer without the characters in `range`.
    ///
    /// The range is clamped to the buffer; an empty or out-of-range slice
    /// leaves the text unchanged.
    pub fn without(&self, range: RangeInclusive<usize>) -> Self {
        let len = self.len();
        let start = (*range.start()).min(len);
        let end = range.end().saturating_add(1).min(len);
        if start >= end {
            return self.clone();
        }
        let mut rope = self.rope.clone();
        rope.remove(start..end);
        Self { rope }
    }
}

impl fmt::Debug for MarkupBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MarkupBuffer").field(&self.text()).finish()
    }
}

impl fmt::Display for MarkupBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

/// The buffer together with its cursor.
///
/// This is the whole of the editor's mutable state, handled as a value:
/// the operations in [`crate::editor`] take a state and hand back a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    buffer: MarkupBuffer,
    cursor: Cursor,
}

impl EditorState {
    /// Empty buffer, cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text with the cursor at 0.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: MarkupBuffer::from_text(text),
            cursor: Cursor::at(0),
        }
    }

    /// Same buffer, cursor moved to a raw position.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::CursorOutOfRange`] unless `-1 <= cursor <= len`.
    pub fn with_cursor(&self, cursor: isize) -> Result<Self, EditError> {
        let len = self.buffer.len();
        let in_range = cursor == -1 || usize::try_from(cursor).is_ok_and(|c| c <= len);
        if !in_range {
            return Err(EditError::CursorOutOfRange { cursor, len });
        }
        Ok(Self {
            buffer: self.buffer.clone(),
            cursor: Cursor(cursor),
        })
    }

    pub(crate) const fn from_parts(buffer: MarkupBuffer, cursor: Cursor) -> Self {
        Self { buffer, cursor }
    }

    pub const fn buffer(&self) -> &MarkupBuffer {
        &self.buffer
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Buffer text with `marker` spliced in at the cursor.
    ///
    /// Presentation only: the state itself is untouched.
    pub fn marked(&self, marker: &str) -> String {
        self.buffer
            .spliced(self.cursor.splice_offset(), marker)
            .text()
    }
}
