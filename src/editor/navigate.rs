//! Cursor movement that treats command names and block delimiters as units.

use crate::editor::{Cursor, MarkupBuffer};

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Single-step delta for this direction.
    pub const fn delta(self) -> isize {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Next cursor position after moving by `delta`.
///
/// Moving left onto the `{` that opens a block jumps back to the command's
/// backslash, so `\name{` is crossed in one step. Moving right from a
/// backslash jumps past the first `{`; any rightward move that would stop
/// on a `{` steps over it.
///
/// Range checks are the caller's job: the result is not clamped. A command
/// name with no `{` after it is skipped to the end of the buffer.
pub fn move_cursor(buffer: &MarkupBuffer, cursor: Cursor, delta: isize) -> Cursor {
    let mut next = cursor.shifted(delta);

    if delta < 0 {
        if buffer.char_at_signed(next.get()) == Some('{')
            && let Some(backslash) = next
                .offset()
                .and_then(|from| buffer.rfind_from(from, '\\'))
        {
            next = Cursor::at(backslash);
        }
        return next;
    }

    if delta > 0 {
        if buffer.char_at_signed(cursor.get()) == Some('\\') {
            let from = next.splice_offset();
            next = buffer
                .find_from(from, '{')
                .map_or_else(|| Cursor::at(buffer.len()), |brace| Cursor::at(brace + 1));
        }
        if buffer.char_at_signed(next.get()) == Some('{') {
            next = next.advanced(1);
        }
    }

    next
}
