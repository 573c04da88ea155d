//! Finding the command that encloses a position.

use std::ops::RangeInclusive;

use crate::editor::MarkupBuffer;
use crate::error::EditError;

/// Bounds of a `\name{...}{...}` command, recomputed on every query.
///
/// `start` is the opening backslash, or `None` when no backslash exists at
/// or before the queried position. `end` is the closing brace of the last
/// block; for unterminated input it degrades to the last character scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpan {
    pub start: Option<usize>,
    pub end: usize,
}

/// Locate the command around `position`.
///
/// The backward scan for `\` includes the character at `position` itself.
/// The forward scan starts one character earlier, at `position - 1`, and
/// stops at the first `}` not directly followed by `{`. Nesting depth is not
/// tracked: a bare `{x}` group inside a block ends the span early.
pub fn locate(buffer: &MarkupBuffer, position: usize) -> CommandSpan {
    let start = buffer.rfind_from(position, '\\');

    let len = buffer.len();
    let from = position.saturating_sub(1);
    let end = (from..len)
        .find(|&idx| buffer.char_at(idx) == Some('}') && buffer.char_at(idx + 1) != Some('{'))
        .unwrap_or(len.saturating_sub(1));

    CommandSpan { start, end }
}

/// The whole command that the brace at `brace` belongs to, as a deletable
/// range.
///
/// Candidates are tried from the nearest `\` at or before the brace
/// backwards, and the first whose blocks reach the brace wins. Block braces
/// are matched by depth, so a nested command or a bare `{x}` group inside a
/// block does not end the span early. A command whose last block is never
/// closed extends to the end of the buffer.
///
/// # Errors
///
/// [`EditError::InvalidCommandContext`] when no command encloses the brace.
pub fn enclosing_command(
    buffer: &MarkupBuffer,
    brace: usize,
) -> Result<RangeInclusive<usize>, EditError> {
    let mut from = brace;
    while let Some(start) = buffer.rfind_from(from, '\\') {
        if let Some(end) = command_end(buffer, start)
            && end >= brace
        {
            return Ok(start..=end);
        }
        let Some(prev) = start.checked_sub(1) else {
            break;
        };
        from = prev;
    }
    Err(EditError::InvalidCommandContext { position: brace })
}

/// Index of the closing brace of the last block of the command at `start`,
/// or `None` if the name is not followed by a block.
fn command_end(buffer: &MarkupBuffer, start: usize) -> Option<usize> {
    let len = buffer.len();
    let mut idx = start + 1;
    while buffer.char_at(idx).is_some_and(|ch| ch.is_ascii_alphabetic()) {
        idx += 1;
    }
    if buffer.char_at(idx) != Some('{') {
        return None;
    }

    loop {
        let mut depth = 0_usize;
        let mut close = None;
        for pos in idx..len {
            match buffer.char_at(pos) {
                Some('{') => depth += 1,
                Some('}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        close = Some(pos);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            return Some(len - 1);
        };
        if buffer.char_at(close + 1) != Some('{') {
            return Some(close);
        }
        idx = close + 1;
    }
}
