//! Dispatch from raw input to editing operations.
//!
//! [`EditorController`] owns the current [`EditorState`] and replaces it
//! with the result of each operation. After every recognized directive it
//! issues a [`RenderRequest`] carrying the markup with the cursor marker
//! spliced in.

mod directive;

pub use directive::{Directive, KEY_BACKSPACE, KEY_LEFT, KEY_RIGHT, KeyMap};

use tracing::{debug, warn};

use crate::editor::{Direction, EditorState, erase, insert, insert_command, move_cursor};
use crate::error::RenderError;
use crate::render::{RenderId, RenderQueue, RenderRequest};

/// Default cursor marker handed to the renderer.
pub const DEFAULT_MARKER: &str = "\u{2038}";

/// Separator used by [`EditorController::debug_view`].
pub const DEBUG_SEPARATOR: &str = "|";

/// What a single input event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State may have changed; render this.
    Render(RenderRequest),
    /// The key code is not mapped. Nothing changed.
    Unrecognized(u32),
    /// The event carried neither a key code nor characters.
    Idle,
}

#[derive(Debug)]
pub struct EditorController {
    state: EditorState,
    keymap: KeyMap,
    marker: String,
    renders: RenderQueue,
}

impl EditorController {
    pub fn new(keymap: KeyMap, marker: impl Into<String>) -> Self {
        Self {
            state: EditorState::new(),
            keymap,
            marker: marker.into(),
            renders: RenderQueue::new(),
        }
    }

    /// Replace the starting state, e.g. to edit existing markup.
    #[must_use]
    pub fn with_state(mut self, state: EditorState) -> Self {
        self.state = state;
        self
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub const fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Entry point for the input capture layer.
    ///
    /// Key-down events carry a code and no characters; typed text carries
    /// characters and no code.
    pub fn handle_key(&mut self, key_code: Option<u32>, chars: Option<&str>) -> Dispatch {
        match Directive::translate(key_code, chars, &self.keymap) {
            Some(directive) => self.apply(directive),
            None => Dispatch::Idle,
        }
    }

    /// Apply one directive and request a render.
    pub fn apply(&mut self, directive: Directive) -> Dispatch {
        let state = &self.state;
        let next = match directive {
            Directive::MoveLeft => {
                if state.cursor().get() > 0 {
                    Self::moved(state, Direction::Left)
                } else {
                    state.clone()
                }
            }
            Directive::MoveRight => {
                if state.cursor().offset().is_none_or(|offset| offset < state.buffer().len()) {
                    Self::moved(state, Direction::Right)
                } else {
                    state.clone()
                }
            }
            Directive::Erase => erase(state),
            Directive::InsertChar(text) => text.chars().fold(state.clone(), |acc, ch| {
                insert(&acc, ch.encode_utf8(&mut [0; 4]))
            }),
            Directive::InsertCommand(template) => insert_command(state, &template),
            Directive::Unrecognized(code) => {
                warn!(code, "unrecognized key");
                return Dispatch::Unrecognized(code);
            }
        };

        debug!(
            cursor = next.cursor().get(),
            len = next.buffer().len(),
            "editor state updated"
        );
        self.state = next;
        Dispatch::Render(self.request_render())
    }

    /// Issue a render of the current state without changing it.
    pub fn request_render(&mut self) -> RenderRequest {
        let markup = self.renderable_markup();
        let marker_at = self.state.cursor().splice_offset();
        self.renders.issue(markup, Some(marker_at))
    }

    /// Markup with the cursor marker at the cursor (index 0 at the sentinel).
    pub fn renderable_markup(&self) -> String {
        self.state.marked(&self.marker)
    }

    /// Markup with a plain `|` at the cursor, for diagnostics.
    pub fn debug_view(&self) -> String {
        self.state.marked(DEBUG_SEPARATOR)
    }

    /// The renderer finished `id`; returns requests now deliverable, in order.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownRequest`] if `id` was never issued or was
    /// already completed.
    pub fn complete_render(&mut self, id: RenderId) -> Result<Vec<RenderRequest>, RenderError> {
        self.renders.complete(id)
    }

    pub fn pending_renders(&self) -> usize {
        self.renders.pending()
    }

    fn moved(state: &EditorState, direction: Direction) -> EditorState {
        let cursor = move_cursor(state.buffer(), state.cursor(), direction.delta());
        EditorState::from_parts(state.buffer().clone(), cursor)
    }
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(KeyMap::default(), DEFAULT_MARKER)
    }
}
