//! Error types for the editing core and the render boundary.

use thiserror::Error;

/// Errors raised by the buffer/cursor model.
///
/// None of these are fatal to an editing session: the controller either
/// recovers (command-aware erase falls back to a plain backspace) or rejects
/// the input before it reaches the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No command encloses the brace at the position.
    #[error("no command encloses the brace at position {position}")]
    InvalidCommandContext { position: usize },

    /// Cursor outside `-1..=len`.
    #[error("cursor {cursor} is outside -1..={len}")]
    CursorOutOfRange { cursor: isize, len: usize },

    /// A command template with zero blocks.
    #[error("command template `{name}` needs at least one block")]
    EmptyTemplate { name: String },

    /// A `NAME/BLOCKS` template spec that could not be parsed.
    #[error("invalid command template `{0}` (expected NAME/BLOCKS)")]
    InvalidTemplate(String),
}

/// Errors raised when the renderer reports back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Completion for a request that is not in flight.
    #[error("render request #{0} is not in flight")]
    UnknownRequest(u64),
}
