//! The buffer/cursor model for single-line math markup.
//!
//! Markup is a flat character sequence holding commands of the form
//! `\name{block}{block}...`. The operations here keep the cursor off command
//! names: navigation crosses `\name{` in one step, and erasing a brace
//! removes its whole command.
//!
//! Every operation is a pure function from one [`EditorState`] to the next.

mod buffer;
mod locate;
mod mutate;
mod navigate;
mod template;

pub use buffer::{Cursor, EditorState, MarkupBuffer};
pub use locate::{CommandSpan, enclosing_command, locate};
pub use mutate::{erase, insert, insert_command};
pub use navigate::{Direction, move_cursor};
pub use template::CommandTemplate;
