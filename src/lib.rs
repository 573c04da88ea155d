// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorState)
    clippy::module_name_repetitions
)]

//! # Mathline
//!
//! A terminal editor for math markup.
//!
//! The user types into an invisible buffer of markup such as
//! `\frac{1}{\sqrt{2}}`. Commands are inserted whole, arrow keys skip over
//! command syntax, and backspace next to a brace removes the entire
//! command. After every edit the markup is handed to a typesetter with a
//! marker string at the cursor so the caret can be placed in the output.
//!
//! ## Architecture
//!
//! Editing is a set of pure functions over an immutable
//! [`EditorState`](editor::EditorState). The
//! [`EditorController`](controller::EditorController) turns raw key events
//! into directives, applies them, and issues render requests.
//!
//! The terminal front-end uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Buffer, cursor, command location, navigation, and mutation
//! - [`controller`]: Key translation and the editing session
//! - [`render`]: Render requests and in-order delivery
//! - [`app`]: Main application loop and state
//! - [`ui`]: Typesetting and terminal UI components
//! - [`config`]: Command-line and config-file flags

pub mod app;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod render;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::controller::{Directive, Dispatch, EditorController, KeyMap};
    pub use crate::editor::{CommandTemplate, Cursor, EditorState, MarkupBuffer};
    pub use crate::error::{EditError, RenderError};
    pub use crate::render::{RenderId, RenderQueue, RenderRequest};
}
