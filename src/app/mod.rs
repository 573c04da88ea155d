//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use crate::controller::{DEFAULT_MARKER, KeyMap};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    keymap: KeyMap,
    marker: String,
    debug_view: bool,
}

impl App {
    /// Create an editor with the default key map and marker.
    pub fn new() -> Self {
        Self {
            keymap: KeyMap::default(),
            marker: DEFAULT_MARKER.to_string(),
            debug_view: false,
        }
    }

    /// Use a custom key map.
    #[must_use]
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Use a custom cursor marker. An empty marker falls back to the default.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !marker.is_empty() {
            self.marker = marker;
        }
        self
    }

    /// Start with the debug view shown.
    #[must_use]
    pub const fn with_debug_view(mut self, visible: bool) -> Self {
        self.debug_view = visible;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
